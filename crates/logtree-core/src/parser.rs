//! The path + format template parser.
//!
//! A single template string carries both the tree path and the message
//! payload. Two-character `%1` directives descend one node level, consuming
//! the next argument as the child name; everything else accumulates into a
//! fragment that is formatted printf-style and emitted as a record whenever
//! a directive (or the end of the template) is reached.
//!
//! The logging macros prepend a metadata header: the literal
//! `$$%s$$%s$$%d$$` followed by file name, function name and line as the
//! first three arguments. A template without that exact prefix simply has
//! no call site metadata.
//!
//! Parsing is pure: the output is a list of path segments plus
//! `(depth, message)` emissions, applied to the tree by the caller under
//! its own locking.

use std::slice;

use crate::record::CallOrigin;

/// Literal metadata header prepended by the logging macros.
pub(crate) const METADATA_HEADER: &str = "$$%s$$%s$$%d$$";

/// Directive character that descends one tree level.
const NODE_DIRECTIVE: char = '1';

/// Longest accepted template, in bytes, metadata header excluded.
pub(crate) const MAX_TEMPLATE_LEN: usize = 255;

/// One argument for the template's conversions and directives.
///
/// The typed stand-in for a C variadic list: callers (usually the
/// macros) convert each value up front via the `From` impls, and the
/// parser consumes them left to right.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// String-ish argument (`%s`, node names)
    Str(String),
    /// Signed integer argument (`%d`, `%i`)
    Int(i64),
    /// Unsigned integer argument (`%u`, line numbers)
    Uint(u64),
    /// Floating point argument (`%f`)
    Float(f64),
    /// Single character argument (`%c`)
    Char(char),
    /// Boolean argument, rendered as `true`/`false`
    Bool(bool),
}

impl FormatArg {
    /// Integer view, when one exists.
    fn as_int(&self) -> Option<i128> {
        match self {
            FormatArg::Int(v) => Some(*v as i128),
            FormatArg::Uint(v) => Some(*v as i128),
            FormatArg::Char(c) => Some(*c as i128),
            FormatArg::Bool(b) => Some(*b as i128),
            FormatArg::Float(_) | FormatArg::Str(_) => None,
        }
    }

    /// Line-number view used when binding the metadata header.
    fn as_line(&self) -> Option<u32> {
        self.as_int().and_then(|v| u32::try_from(v).ok())
    }
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatArg::Str(s) => f.write_str(s),
            FormatArg::Int(v) => write!(f, "{}", v),
            FormatArg::Uint(v) => write!(f, "{}", v),
            FormatArg::Float(v) => write!(f, "{}", v),
            FormatArg::Char(c) => write!(f, "{}", c),
            FormatArg::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(v: &str) -> Self {
        FormatArg::Str(v.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(v: String) -> Self {
        FormatArg::Str(v)
    }
}

impl From<&String> for FormatArg {
    fn from(v: &String) -> Self {
        FormatArg::Str(v.clone())
    }
}

impl From<char> for FormatArg {
    fn from(v: char) -> Self {
        FormatArg::Char(v)
    }
}

impl From<bool> for FormatArg {
    fn from(v: bool) -> Self {
        FormatArg::Bool(v)
    }
}

impl From<f32> for FormatArg {
    fn from(v: f32) -> Self {
        FormatArg::Float(v as f64)
    }
}

impl From<f64> for FormatArg {
    fn from(v: f64) -> Self {
        FormatArg::Float(v)
    }
}

macro_rules! arg_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for FormatArg {
            fn from(v: $t) -> Self {
                FormatArg::Int(v as i64)
            }
        }
    )*};
}

macro_rules! arg_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for FormatArg {
            fn from(v: $t) -> Self {
                FormatArg::Uint(v as u64)
            }
        }
    )*};
}

arg_from_signed!(i8, i16, i32, i64, isize);
arg_from_unsigned!(u8, u16, u32, u64, usize);

/// One record emission produced while walking a template.
#[derive(Debug, PartialEq)]
pub(crate) struct Emit {
    /// How many path segments were active when the fragment flushed
    pub depth: usize,
    /// Formatted message
    pub message: String,
}

/// The decoded form of one logging call.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ParsedCall {
    /// Call site metadata, present iff the template carried the header
    pub origin: Option<CallOrigin>,
    /// Node names in descent order
    pub path: Vec<String>,
    /// Record emissions, in template order
    pub emits: Vec<Emit>,
}

/// Decode `template` against `args`.
///
/// Returns `None` when the call must be dropped (template over the
/// length ceiling). Argument exhaustion at a directive ends the walk
/// early; exhaustion at a conversion leaves that conversion verbatim.
pub(crate) fn parse(template: &str, args: &[FormatArg]) -> Option<ParsedCall> {
    let mut cursor = args.iter();
    let mut parsed = ParsedCall::default();

    let body = match template.strip_prefix(METADATA_HEADER) {
        Some(rest) => {
            parsed.origin = Some(bind_origin(&mut cursor));
            rest
        }
        None => template,
    };

    if body.len() > MAX_TEMPLATE_LEN {
        return None;
    }

    let mut fragment = String::new();
    let mut chars = body.chars();

    loop {
        match chars.next() {
            None => break,
            Some('%') => match chars.next() {
                Some(NODE_DIRECTIVE) => {
                    flush(&mut fragment, &mut cursor, &mut parsed);
                    match cursor.next() {
                        Some(name) => parsed.path.push(name.to_string()),
                        // Out of node names: nothing sensible left to do
                        // with the rest of the template.
                        None => return Some(parsed),
                    }
                }
                Some(other) => {
                    fragment.push('%');
                    fragment.push(other);
                }
                None => {
                    fragment.push('%');
                    break;
                }
            },
            Some(c) => fragment.push(c),
        }
    }

    flush(&mut fragment, &mut cursor, &mut parsed);
    Some(parsed)
}

/// Format and emit a pending fragment at the current depth.
fn flush(fragment: &mut String, cursor: &mut slice::Iter<'_, FormatArg>, parsed: &mut ParsedCall) {
    if fragment.is_empty() {
        return;
    }
    let message = format_fragment(fragment, cursor);
    parsed.emits.push(Emit {
        depth: parsed.path.len(),
        message,
    });
    fragment.clear();
}

/// Bind the three header arguments (file, function, line).
fn bind_origin(cursor: &mut slice::Iter<'_, FormatArg>) -> CallOrigin {
    let file = cursor.next().map(ToString::to_string).unwrap_or_default();
    let func = cursor.next().map(ToString::to_string).unwrap_or_default();
    let line = cursor.next().and_then(FormatArg::as_line).unwrap_or(0);
    CallOrigin { file, func, line }
}

/// A parsed printf conversion specification.
struct ConvSpec {
    left_align: bool,
    zero_pad: bool,
    plus_sign: bool,
    width: Option<usize>,
    precision: Option<usize>,
    /// The conversion text exactly as written, for verbatim fallback
    raw: String,
}

/// Format a fragment's printf conversions against the argument cursor.
///
/// Supported conversions: `%s %d %i %u %x %X %f %c %%`. Length modifiers
/// are accepted and ignored. Anything unrecognized, and any conversion
/// left without an argument, stays in the output verbatim.
fn format_fragment(fragment: &str, cursor: &mut slice::Iter<'_, FormatArg>) -> String {
    let mut out = String::new();
    let mut chars = fragment.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut spec = ConvSpec {
            left_align: false,
            zero_pad: false,
            plus_sign: false,
            width: None,
            precision: None,
            raw: String::from("%"),
        };

        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.left_align = true,
                '0' => spec.zero_pad = true,
                '+' => spec.plus_sign = true,
                ' ' | '#' => {}
                _ => break,
            }
            spec.raw.push(flag);
            chars.next();
        }

        spec.width = scan_number(&mut chars, &mut spec.raw);

        if chars.peek() == Some(&'.') {
            spec.raw.push('.');
            chars.next();
            spec.precision = scan_number(&mut chars, &mut spec.raw).or(Some(0));
        }

        while let Some(&m) = chars.peek() {
            if matches!(m, 'l' | 'h' | 'z' | 'j' | 't') {
                spec.raw.push(m);
                chars.next();
            } else {
                break;
            }
        }

        match chars.next() {
            Some(conv) if matches!(conv, 's' | 'd' | 'i' | 'u' | 'x' | 'X' | 'f' | 'c') => {
                match cursor.next() {
                    Some(arg) => out.push_str(&render(arg, conv, &spec)),
                    None => {
                        out.push_str(&spec.raw);
                        out.push(conv);
                    }
                }
            }
            Some(other) => {
                out.push_str(&spec.raw);
                out.push(other);
            }
            None => out.push_str(&spec.raw),
        }
    }

    out
}

/// Scan a run of digits, mirroring them into `raw`.
fn scan_number(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    raw: &mut String,
) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(&d) = chars.peek() {
        match d.to_digit(10) {
            Some(digit) => {
                value = Some(value.unwrap_or(0) * 10 + digit as usize);
                raw.push(d);
                chars.next();
            }
            None => break,
        }
    }
    value
}

/// Render one argument under one conversion.
fn render(arg: &FormatArg, conv: char, spec: &ConvSpec) -> String {
    let body = match conv {
        's' => {
            let mut s = arg.to_string();
            if let Some(precision) = spec.precision {
                if let Some((cut, _)) = s.char_indices().nth(precision) {
                    s.truncate(cut);
                }
            }
            s
        }
        'd' | 'i' | 'u' => match arg.as_int() {
            Some(v) if spec.plus_sign && v >= 0 => format!("+{}", v),
            Some(v) => v.to_string(),
            None => arg.to_string(),
        },
        'x' => match arg.as_int() {
            Some(v) => format!("{:x}", v),
            None => arg.to_string(),
        },
        'X' => match arg.as_int() {
            Some(v) => format!("{:X}", v),
            None => arg.to_string(),
        },
        'f' => {
            let v = match arg {
                FormatArg::Float(v) => *v,
                other => other.as_int().map(|i| i as f64).unwrap_or(0.0),
            };
            format!("{:.*}", spec.precision.unwrap_or(6), v)
        }
        'c' => match arg {
            FormatArg::Char(c) => c.to_string(),
            FormatArg::Str(s) => s.chars().next().map(String::from).unwrap_or_default(),
            other => other
                .as_int()
                .and_then(|v| u32::try_from(v).ok())
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_default(),
        },
        _ => arg.to_string(),
    };

    pad(body, spec)
}

/// Apply width padding.
fn pad(body: String, spec: &ConvSpec) -> String {
    let width = match spec.width {
        Some(w) if body.chars().count() < w => w,
        _ => return body,
    };

    if spec.left_align {
        format!("{:<width$}", body)
    } else if spec.zero_pad {
        // Keep a leading sign in front of the zeros
        match body.strip_prefix('-') {
            Some(digits) => format!("-{:0>w$}", digits, w = width - 1),
            None => format!("{:0>width$}", body),
        }
    } else {
        format!("{:>width$}", body)
    }
}
