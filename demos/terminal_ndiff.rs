use console::Style;
use kindred::text::ndiff;

fn main() {
    let old = "one\ntwo\nthree\nfour\nfive\nsix\n";
    let new = "ore\ntwo\ntree\nfour\nemu\nsix\n";
    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();

    for line in ndiff(&old_lines, &new_lines) {
        let style = match line.chars().next() {
            Some('-') => Style::new().red(),
            Some('+') => Style::new().green(),
            Some('?') => Style::new().cyan(),
            _ => Style::new(),
        };
        print!("{}", style.apply_to(&line));
    }
}
