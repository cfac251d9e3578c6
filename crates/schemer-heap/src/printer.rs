//! `write`/`display`-style rendering of [`Value`].
//!
//! `Display` implements the `write` representation (strings quoted and
//! escaped, characters spelled `#\a`/`#\space`/`#\newline`) since that is
//! the representation useful for error messages and round-tripping
//! through the reader. The `human` module offers the `display`
//! representation (strings and characters printed literally) for the
//! `display` primitive.

use std::fmt;
use std::rc::Rc;

use crate::value::{ProcedureData, Value};

/// Detects a circular list via Floyd's tortoise-and-hare;
/// reused by both the printer (to cut off otherwise-infinite output) and
/// `list?` in [`crate::equality`].
pub(crate) fn pair_cycle_point(start: &Value) -> Option<*const ()> {
    let mut slow = start.clone();
    let mut fast = start.clone();
    loop {
        let Value::Pair(fast_pair) = &fast else { return None };
        let next_fast = fast_pair.cdr.borrow().clone();
        let Value::Pair(fast_pair2) = &next_fast else { return None };
        fast = fast_pair2.cdr.borrow().clone();

        let Value::Pair(slow_pair) = &slow else { return None };
        slow = slow_pair.cdr.borrow().clone();

        if let (Value::Pair(a), Value::Pair(b)) = (&slow, &fast) {
            if Rc::ptr_eq(a, b) {
                return Some(Rc::as_ptr(a) as *const ());
            }
        }
    }
}

fn char_name(byte: u8) -> String {
    match byte {
        b' ' => "space".to_string(),
        b'\n' => "newline".to_string(),
        b'\t' => "tab".to_string(),
        b'\r' => "return".to_string(),
        0 => "null".to_string(),
        0x7f => "delete".to_string(),
        0x08 => "backspace".to_string(),
        b if b.is_ascii_graphic() || b == b' ' => (b as char).to_string(),
        b => format!("x{b:x}"),
    }
}

fn write_string_escaped(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    write!(f, "\"")?;
    for &byte in bytes {
        match byte {
            b'"' => write!(f, "\\\"")?,
            b'\\' => write!(f, "\\\\")?,
            b => write!(f, "{}", b as char)?,
        }
    }
    write!(f, "\"")
}

fn write_pair(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    let cycle_start = pair_cycle_point(value);
    write!(f, "(")?;
    let mut cursor = value.clone();
    let mut first = true;
    loop {
        match &cursor {
            Value::Pair(pair) => {
                if let Some(start) = cycle_start {
                    if !first && Rc::as_ptr(pair) as *const () == start {
                        write!(f, " ...")?;
                        break;
                    }
                }
                if !first {
                    write!(f, " ")?;
                }
                first = false;
                write!(f, "{}", pair.car.borrow())?;
                let next = pair.cdr.borrow().clone();
                cursor = next;
            }
            Value::EmptyList => break,
            other => {
                write!(f, " . {other}")?;
                break;
            }
        }
    }
    write!(f, ")")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::EmptyList => write!(f, "()"),
            Value::Bool(true) => write!(f, "#t"),
            Value::Bool(false) => write!(f, "#f"),
            Value::Char(byte) => write!(f, "#\\{}", char_name(*byte)),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => {
                if x.fract() == 0.0 && x.is_finite() {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            Value::Str(s) => write_string_escaped(f, &s.bytes.borrow()),
            Value::Symbol(sym) => write!(f, "{}", sym.as_str()),
            Value::Pair(_) => write_pair(f, self),
            Value::Vector(v) => {
                write!(f, "#(")?;
                for (i, item) in v.items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Value::Procedure(proc) => match proc.as_ref() {
                ProcedureData::Closure { name, .. } => match &*name.borrow() {
                    Some(name) => write!(f, "#<procedure {}>", name.as_str()),
                    None => write!(f, "#<procedure>"),
                },
                ProcedureData::Primitive { name, .. } => write!(f, "#<primitive {name}>"),
            },
            Value::Environment(_) => write!(f, "#<environment>"),
            Value::Promise(_) => write!(f, "#<promise>"),
        }
    }
}

/// The `display` representation: strings and characters render as their
/// literal contents rather than a re-readable `write` form.
pub struct Human<'a>(pub &'a Value);

impl fmt::Display for Human<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Char(byte) => write!(f, "{}", *byte as char),
            Value::Str(s) => write!(f, "{}", s.as_string_lossy()),
            Value::Pair(_) => {
                write!(f, "(")?;
                let mut cursor = self.0.clone();
                let mut first = true;
                loop {
                    match &cursor {
                        Value::Pair(pair) => {
                            if !first {
                                write!(f, " ")?;
                            }
                            first = false;
                            write!(f, "{}", Human(&pair.car.borrow()))?;
                            let next = pair.cdr.borrow().clone();
                            cursor = next;
                        }
                        Value::EmptyList => break,
                        other => {
                            write!(f, " . {}", Human(other))?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
            Value::Vector(v) => {
                write!(f, "#(")?;
                for (i, item) in v.items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", Human(item))?;
                }
                write!(f, ")")
            }
            other => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_proper_list() {
        let list = Value::from_vec(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(list.to_string(), "(1 2)");
    }

    #[test]
    fn writes_dotted_pair() {
        let pair = Value::cons(Value::Int(1), Value::Int(2));
        assert_eq!(pair.to_string(), "(1 . 2)");
    }

    #[test]
    fn writes_quoted_string_with_escapes() {
        let s = Value::string("a\"b".as_bytes().to_vec());
        assert_eq!(s.to_string(), "\"a\\\"b\"");
    }

    #[test]
    fn writes_control_bytes_raw_so_printer_output_reads_back_unchanged() {
        let s = Value::string(vec![b'\n']);
        assert_eq!(s.to_string(), "\"\n\"");
    }

    #[test]
    fn display_renders_string_without_quotes() {
        let s = Value::string("hi".as_bytes().to_vec());
        assert_eq!(Human(&s).to_string(), "hi");
    }

    #[test]
    fn writes_named_characters() {
        assert_eq!(Value::Char(b' ').to_string(), "#\\space");
        assert_eq!(Value::Char(b'a').to_string(), "#\\a");
    }

    #[test]
    fn cyclic_list_truncates_with_ellipsis() {
        let pair = std::rc::Rc::new(crate::value::PairData::new(Value::Int(1), Value::EmptyList));
        pair.set_cdr(Value::Pair(pair.clone())).unwrap();
        let rendered = Value::Pair(pair).to_string();
        assert!(rendered.contains("..."));
    }
}
