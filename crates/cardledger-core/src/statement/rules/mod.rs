//! Rule-based token parsers shared by every bank grammar.

pub mod amounts;
pub mod dates;
pub mod patterns;
pub mod summary;

pub use amounts::{parse_amount, parse_amount_token, resolve_direction, AmountToken, Marker};
pub use dates::{parse_any_date, parse_date};
pub use summary::{
    extract_inline, fill, find_labels, only_labels_and_values, value_tokens, LabelMatch,
    SummaryField, SummaryFields, ValueKind, ValueToken,
};
