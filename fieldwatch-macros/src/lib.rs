use proc_macro::TokenStream;

mod document;

/// Derive macro for implementing the `Document` trait.
///
/// Lists the serialized names of a struct's named fields. Field-level
/// `#[serde(rename = "...")]` and `#[serde(skip)]` / `#[serde(skip_serializing)]`
/// are honored, as is a container-level `#[serde(rename_all = "...")]`.
///
/// ```rust,ignore
/// #[derive(Serialize, Document)]
/// #[serde(rename_all = "camelCase")]
/// struct User {
///     display_name: String,   // "displayName"
///     #[serde(rename = "mail")]
///     email: String,          // "mail"
///     #[serde(skip)]
///     cache: Option<String>,  // not listed
/// }
/// ```
#[proc_macro_derive(Document, attributes(serde))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    document::derive_document_impl(input)
}
