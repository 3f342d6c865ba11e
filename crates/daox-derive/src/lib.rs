//! Derive macros for daox
//!
//! Provides `#[derive(Tagged)]`, which describes a struct's field tags to the
//! daox mapper.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod tagged;

/// Derive `Tagged` for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use daox::Tagged;
///
/// #[derive(Tagged)]
/// struct User {
///     #[daox(db = "id", json = "id")]
///     id: i64,
///     #[daox(db = "nickname", json = "name")]
///     name: String,
///     #[daox(db = "-")]
///     cache: Option<String>,
///     #[daox(db = "profile", skip_value)]
///     profile: Profile,
/// }
/// ```
///
/// # Attributes
///
/// - `#[daox(key = "value", ...)]` - Record one tag value per key on a field.
///   A value of `"-"` or `""` hides the field from that key's mapper.
/// - `#[daox(skip_value)]` - Map the field for column names only; it never
///   produces a bound value, so its type needs no `daox::Value` conversion.
///
/// Fields without a `#[daox(...)]` attribute are not mapped. Other mapped
/// fields must be `Clone` and convertible into `daox::Value`.
#[proc_macro_derive(Tagged, attributes(daox))]
pub fn derive_tagged(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    tagged::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
