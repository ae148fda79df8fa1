#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the relay infrastructure.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! relay-derive.workspace = true
//! thiserror.workspace = true # the expansion derives `thiserror::Error`
//! ```
//!
//! The doc examples are `ignore`d because a proc-macro crate cannot use its own
//! macros; see `tests/ui` for compiled usage.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// An attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Labels**: Generates `label(&self) -> &'static str`, a stable `snake_case` label made of
///   the enum name (without the `Error` suffix) and the variant name, e.g.
///   `EventBusError::InvalidChannel` -> `"event_bus_invalid_channel"`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` implementations
///   if an `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`), and a context field.
/// 4. Tuple or unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use relay_derive::relay_error;
/// use std::borrow::Cow;
///
/// #[relay_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<String, StoreError> {
///     let raw = std::fs::read_to_string("messages.txt").context("Reading inbox dump")?;
///     raw.lines().next().map(str::to_owned).ok_or_else(|| "empty dump".into())
/// }
///
/// assert_eq!(StoreError::from("boom").label(), "store_internal");
/// ```
#[proc_macro_attribute]
pub fn relay_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_relay_error(input).into()
}
