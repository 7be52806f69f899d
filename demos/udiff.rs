use std::fs::read_to_string;
use std::process::exit;

use kindred::text::UnifiedDiff;

fn main() {
    let args: Vec<_> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: udiff [old] [new]");
        exit(1);
    }

    let old = read_to_string(&args[1]).unwrap();
    let new = read_to_string(&args[2]).unwrap();
    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();
    print!(
        "{}",
        UnifiedDiff::new(&old_lines, &new_lines).header(&args[1], &args[2])
    );
}
