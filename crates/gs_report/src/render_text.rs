//! Plain-text report, one file per recipient.
//!
//! ```text
//! Imię: Anna
//! Linki:
//!   https://x/tv, 600 zł
//! Współdzielone:
//!   https://x/tv, 600 zł, Jan
//! Suma końcowa: 600 zł
//! ```

use std::collections::BTreeSet;
use std::fmt::Write as _;

use gs_core::price::format_price;
use gs_core::ResultEntry;

const EMPTY_SECTION: &str = "  (brak)";

struct TextBuilder {
    buf: String,
}

impl TextBuilder {
    fn new() -> Self {
        Self { buf: String::with_capacity(512) }
    }

    fn field(&mut self, label: &str, value: &str) {
        let _ = writeln!(self.buf, "{label}: {value}");
    }

    fn section<I>(&mut self, label: &str, rows: I)
    where
        I: IntoIterator<Item = String>,
    {
        let _ = writeln!(self.buf, "{label}:");
        let mut any = false;
        for row in rows {
            any = true;
            let _ = writeln!(self.buf, "  {row}");
        }
        if !any {
            let _ = writeln!(self.buf, "{EMPTY_SECTION}");
        }
    }

    fn finish(self) -> String {
        self.buf
    }
}

pub fn render_recipient_text(entry: &ResultEntry) -> String {
    let mut t = TextBuilder::new();
    t.field("Imię", &entry.name);
    t.section("Linki", entry.links.iter().map(|p| format!("{}, {}", p.link, format_price(p.price))));
    t.section(
        "Współdzielone",
        entry.shared.iter().map(|s| {
            let mut row = format!("{}, {}", s.link, format_price(s.price));
            for other in &s.shared_with {
                row.push_str(", ");
                row.push_str(other);
            }
            row
        }),
    );
    t.field("Suma końcowa", &format_price(entry.total));
    t.finish()
}

/// `<name>.txt` with path separators, reserved characters and control
/// characters replaced by `_`. Blank or dot-only names become `_`.
pub fn report_file_name(name: &str) -> String {
    format!("{}.txt", file_stem(name))
}

/// File names for a batch of recipients, in input order. Names that collide
/// once sanitized get `_2`, `_3`, ... The collision check ignores case so the
/// set stays distinct on case-insensitive filesystems.
pub fn report_file_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken: BTreeSet<String> = BTreeSet::new();
    names
        .into_iter()
        .map(|name| {
            let stem = file_stem(name);
            let mut file = format!("{stem}.txt");
            let mut n = 2;
            while !taken.insert(file.to_lowercase()) {
                file = format!("{stem}_{n}.txt");
                n += 1;
            }
            file
        })
        .collect()
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        return "_".to_string();
    }
    stem
}
