mod record;

use proc_macro::TokenStream;

/// Derive macro that implements `catalog_sync::Record`.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(collection = "books")]
/// struct RawBook {
///     pub id: String,
///     pub name: String,
/// }
/// ```
///
/// - `collection` defaults to the snake_case struct name plus `s`.
/// - `id()` borrows the struct's `id: String` field.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
