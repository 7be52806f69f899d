use std::process::exit;

use kindred::text::get_close_matches;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("usage: close-matches [word] [candidate]...");
        exit(1);
    }

    let candidates: Vec<&str> = args[1..].iter().map(String::as_str).collect();
    match get_close_matches(&args[0], &candidates, 3, 0.6) {
        Ok(matches) => {
            for word in matches {
                println!("{}", word);
            }
        }
        Err(err) => {
            eprintln!("error: {}", err);
            exit(1);
        }
    }
}
