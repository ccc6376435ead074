use veil_core::Locale;
use veil_rules::{registry, tag};

pub fn handle() {
    println!("{:<10} {:<8} {:<8} {:<7} {}", "KEY", "TAG", "ZH", "MODE", "GUARD");
    for category in registry() {
        println!(
            "{:<10} {:<8} {:<8} {:<7} {}",
            category.key.as_str(),
            tag(category.key, Locale::En),
            tag(category.key, Locale::Zh),
            category.mode.as_str(),
            if category.digit_guard { "digits" } else { "-" },
        );
    }
}
