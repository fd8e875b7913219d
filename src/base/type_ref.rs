//! Type text helpers.
//!
//! Types are carried around as plain text (`[2]Pair<str,List<T>>`). These
//! helpers take that text apart and put it back together:
//!
//! ```text
//! [2]Pair<str,List<T>>
//! ^^^ array prefix
//!    ^^^^ base name
//!        ^^^^^^^^^^^^^ generic arguments (top-level comma split)
//! ```

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

static ARRAY_DIM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d*)\]").expect("array dimension pattern is valid"));

static ARRAY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\[\d*\])+").expect("array prefix pattern is valid"));

/// Split trailing generic arguments off a name or type.
///
/// `Foo<T1, T2>` yields `("Foo", ["T1", "T2"])`. Only top-level commas split,
/// so `Map<K,List<V>>` yields `["K", "List<V>"]`. Text without a well-formed
/// `<...>` suffix is returned unchanged with no arguments.
pub fn split_generics(text: &str) -> (String, Vec<String>) {
    let text = text.trim();
    let (Some(open), true) = (text.find('<'), text.ends_with('>')) else {
        return (text.to_string(), Vec::new());
    };

    let base = text[..open].trim().to_string();
    let inner = &text[open + 1..text.len() - 1];

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(inner[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = inner[start..].trim();
    if !last.is_empty() || !args.is_empty() {
        args.push(last.to_string());
    }

    (base, args)
}

/// Inverse of [`split_generics`].
pub fn join_generics(base: &str, args: &[String]) -> String {
    if args.is_empty() {
        base.to_string()
    } else {
        format!("{}<{}>", base, args.join(","))
    }
}

/// Strip array notation from a type and report the array length.
///
/// Every `[N]` group is removed; the last group decides the length. An empty
/// or zero size (`[]`, `[0]`) counts as one element; a size too large for
/// `usize` saturates. `None` means the type is not an array.
pub fn array_len(type_text: &str) -> (String, Option<usize>) {
    let mut len = None;
    for caps in ARRAY_DIM.captures_iter(type_text) {
        // Digits only, so a parse failure is either empty or an overflow
        let digits = &caps[1];
        let n = digits
            .parse::<usize>()
            .unwrap_or(if digits.is_empty() { 0 } else { usize::MAX });
        len = Some(n.max(1));
    }
    match len {
        Some(_) => (ARRAY_DIM.replace_all(type_text, "").into_owned(), len),
        None => (type_text.to_string(), None),
    }
}

/// Generic parameter bindings for one template instantiation.
///
/// Maps each declared parameter name of a template to the argument text a
/// usage supplied for it, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    map: IndexMap<String, String>,
}

impl Bindings {
    /// Bind `params` to `args` positionally.
    ///
    /// Returns `Err((expected, found))` when the lengths differ; no partial
    /// binding is ever produced.
    pub fn zip(params: &[String], args: &[String]) -> Result<Self, (usize, usize)> {
        if params.len() != args.len() {
            return Err((params.len(), args.len()));
        }
        let map = params
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect::<IndexMap<_, _>>();
        Ok(Self { map })
    }

    /// The bound argument for `name`, or `name` itself when unbound.
    pub fn same<'a>(&'a self, name: &'a str) -> &'a str {
        self.map.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Substitute bound parameters inside a type text.
///
/// The array prefix is preserved, the base name is replaced when bound, and
/// generic arguments are substituted recursively. Unbound names pass through.
pub fn substitute(type_text: &str, bindings: &Bindings) -> String {
    if bindings.is_empty() {
        return type_text.to_string();
    }
    let type_text = type_text.trim();
    let prefix_len = ARRAY_PREFIX.find(type_text).map_or(0, |m| m.end());
    let (prefix, rest) = type_text.split_at(prefix_len);

    let (base, args) = split_generics(rest);
    let args = args
        .iter()
        .map(|arg| substitute(arg, bindings))
        .collect::<Vec<_>>();

    format!("{}{}", prefix, join_generics(bindings.same(&base), &args))
}
