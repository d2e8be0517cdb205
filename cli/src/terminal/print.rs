use colored::*;
use unicode_width::UnicodeWidthStr;

use crate::terminal::{colors, spinner};

pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 7;

pub fn print(msg: &str) {
    spinner::println(msg);
}

pub fn banner() {
    let text_content = format!("⟦ NETSWITCH v{} ⟧", env!("CARGO_PKG_VERSION"));
    let text_width = UnicodeWidthStr::width(text_content.as_str());
    let text = text_content.bright_green().bold();
    let sep = "═"
        .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
        .bright_black();

    print(&format!("{}{}{}", sep, text, sep));
}

pub fn header(msg: &str) {
    let formatted = format!("⟦ {} ⟧", msg);
    let msg_len = formatted.chars().count();

    let dash_count = TOTAL_WIDTH.saturating_sub(msg_len);
    let left = dash_count / 2;
    let right = dash_count - left;

    let line = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix = ">".color(colors::SEPARATOR);
    print(&format!(
        "{} {}",
        prefix,
        msg.as_ref().color(colors::TEXT_DEFAULT)
    ));
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str = format!("[{}]", idx.to_string().color(colors::ACCENT));
    print(&format!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

pub fn as_tree_one_level(key_value_pairs: Vec<(String, ColoredString)>) {
    for (i, (key, value)) in key_value_pairs.iter().enumerate() {
        let last = i + 1 == key_value_pairs.len();
        let branch = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let dots = ".".repeat(KEY_WIDTH.saturating_sub(key.len()));
        print(&format!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn end_of_program() {
    print(&format!(
        "{}",
        "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)
    ));
}
