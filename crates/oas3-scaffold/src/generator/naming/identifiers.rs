use std::{collections::HashSet, sync::LazyLock};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

static FORBIDDEN_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "gen",
  ]
  .into_iter()
  .collect()
});

static RESERVED_PASCAL_CASE: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "Clone", "Copy", "Display", "Option", "Result", "Send", "String", "Sync", "Type", "Vec",
  ]
  .into_iter()
  .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Transliterates to ASCII, replaces runs of invalid characters with a single
/// underscore and trims underscores from both ends.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Upper-cases the first character and leaves the rest untouched.
///
/// ```text
/// "profile"  => "Profile"
/// "getUser"  => "GetUser"
/// ""         => ""
/// ```
pub(crate) fn capitalize_first(input: &str) -> String {
  let mut chars = input.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_uppercase().chain(chars).collect(),
  }
}

/// Converts a string into a valid Rust field name (`snake_case`).
///
/// # Rules:
/// 1. A leading `-` is stripped and `negative_` is prepended.
/// 2. The rest is sanitized and converted to `snake_case`.
/// 3. `self`, `crate` and `super` get a trailing `_`, other keywords get the
///    raw prefix `r#`.
/// 4. A leading digit is prefixed with `_`; an empty result becomes `field`.
pub(crate) fn to_rust_field_name(name: &str) -> String {
  let (negative, base) = match name.strip_prefix('-') {
    Some(stripped) => (true, stripped),
    None => (false, name),
  };

  let mut ident = sanitize(base).to_snake_case();
  if ident.is_empty() {
    return "field".to_string();
  }

  if negative {
    ident = format!("negative_{ident}");
  }

  if matches!(ident.as_str(), "self" | "crate" | "super") {
    return format!("{ident}_");
  }

  if FORBIDDEN_IDENTIFIERS.contains(ident.as_str()) {
    return format!("r#{ident}");
  }

  prefix_if_digit_start(&mut ident, '_');
  ident
}

/// Converts a string into a valid Rust type name (`PascalCase`).
///
/// Names that are already mixed case without separators keep their
/// capitalization (`XMLHttpRequest` stays as is); everything else is split on
/// separators and case boundaries and re-capitalized word by word.
/// A leading `-` becomes `Negative`, a leading digit gets a `T` prefix, an
/// empty result becomes `Unnamed` and names that clash with prelude types get
/// the raw prefix `r#`.
pub(crate) fn to_rust_type_name(name: &str) -> String {
  let (negative, base) = match name.strip_prefix('-') {
    Some(stripped) => (true, stripped),
    None => (false, name),
  };

  let has_separators = base.contains(['-', '_', '.', ' ', '/']);
  let has_upper = base.chars().any(|c| c.is_ascii_uppercase());
  let has_lower = base.chars().any(|c| c.is_ascii_lowercase());

  let ascii = any_ascii(base);
  let mut ident: String = if !has_separators && has_upper && has_lower {
    capitalize_first(&ascii.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
  } else {
    split_words(&ascii).into_iter().map(capitalize_word).collect()
  };

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if negative {
    ident = format!("Negative{ident}");
  }

  if ident == "Self" {
    return "Self_".to_string();
  }

  if RESERVED_PASCAL_CASE.contains(ident.as_str()) {
    return format!("r#{ident}");
  }

  prefix_if_digit_start(&mut ident, 'T');
  ident
}

/// File stem for a generated file: `snake_case`, never a raw identifier.
pub(crate) fn to_file_stem(name: &str) -> String {
  let stem = sanitize(name.trim_start_matches("r#")).to_snake_case();
  if stem.is_empty() { "unnamed".to_string() } else { stem }
}

/// `SCREAMING_SNAKE_CASE` constant name.
pub(crate) fn to_rust_const_name(input: &str) -> String {
  let sanitized = sanitize(input);
  if sanitized.is_empty() {
    return "UNNAMED".to_string();
  }

  let mut ident = sanitized.to_constant_case();
  prefix_if_digit_start(&mut ident, '_');
  ident
}

fn prefix_if_digit_start(ident: &mut String, prefix: char) {
  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, prefix);
  }
}

/// Splits on non-alphanumeric characters and before an upper-case letter that
/// follows a lower-case one or starts a capitalized word (`XMLParser` gives
/// `XML`, `Parser`).
fn split_words(input: &str) -> Vec<&str> {
  let bytes = input.as_bytes();
  let mut words = vec![];
  let mut start = None;

  for (i, &b) in bytes.iter().enumerate() {
    if !b.is_ascii_alphanumeric() {
      if let Some(s) = start.take() {
        words.push(&input[s..i]);
      }
      continue;
    }

    let boundary = b.is_ascii_uppercase()
      && i > 0
      && (bytes[i - 1].is_ascii_lowercase() || bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase));
    match start {
      Some(s) if boundary && s < i => {
        words.push(&input[s..i]);
        start = Some(i);
      }
      None => start = Some(i),
      _ => {}
    }
  }

  if let Some(s) = start {
    words.push(&input[s..]);
  }
  words
}

fn capitalize_word(word: &str) -> String {
  capitalize_first(&word.to_ascii_lowercase())
}
