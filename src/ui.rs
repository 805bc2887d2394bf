use colored::Colorize;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Print a step indicator
pub fn step(num: usize, total: usize, msg: &str) {
    println!("{} {}", format!("[{num}/{total}]").blue().bold(), msg);
}

/// Print a status line with a check or cross mark
pub fn check(ok: bool, label: &str, detail: &str) {
    let mark = if ok { "✓".green() } else { "✗".red() };
    if detail.is_empty() {
        println!("  {mark} {label}");
    } else {
        println!("  {} {} - {}", mark, label, detail.dimmed());
    }
}

/// Print the category hint for a swarmkit error
pub fn hint(err: &swarmkit::Error) {
    let category = err.category();
    dim(&format!("{}: {}", category.description(), category.advice()));
}
