//! Procedural macros for tui-modal

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Infer categories from variant name prefixes
    #[darling(default)]
    infer_categories: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Leave this variant uncategorized
    #[darling(default)]
    skip_category: bool,
}

// Verbs that end an action name; everything before the verb is the category.
const ACTION_VERBS: &[&str] = &[
    "Open", "Close", "Toggle", "Show", "Hide", "Submit", "Confirm", "Cancel", "Dismiss", "Scroll",
    "Focus", "Blur", "Select", "Set", "Clear", "Reset", "Load", "Save",
];

/// Split a PascalCase identifier into words
fn split_pascal_case(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, ch) in s.char_indices().skip(1) {
        if ch.is_uppercase() {
            parts.push(&s[start..i]);
            start = i;
        }
    }
    if start < s.len() {
        parts.push(&s[start..]);
    }
    parts
}

fn to_snake_case(s: &str) -> String {
    split_pascal_case(s)
        .iter()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `ModalOpen` -> `modal`, `PageScrollDown` -> `page`, `Quit` -> none
///
/// Names that start with a verb, or contain none, stay uncategorized.
fn infer_category(name: &str) -> Option<String> {
    let parts = split_pascal_case(name);
    let first = *parts.first()?;
    if ACTION_VERBS.contains(&first) {
        return None;
    }
    let verb_at = parts
        .iter()
        .skip(1)
        .position(|part| ACTION_VERBS.contains(part))?
        + 1;
    Some(to_snake_case(&parts[..verb_at].concat()))
}

/// Derive macro for the Action trait
///
/// Generates `name()` returning the variant name.
///
/// With `#[action(infer_categories)]` it also implements `ActionCategory`
/// and adds an `is_{category}()` predicate per category. Variants can set
/// `#[action(category = "...")]` or opt out with `#[action(skip_category)]`.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum AppAction {
///     ModalOpen,
///     ModalClose,
///     #[action(category = "ui")]
///     UiTerminalResize(u16, u16),
///     Quit,
/// }
///
/// assert_eq!(AppAction::ModalOpen.name(), "ModalOpen");
/// assert_eq!(AppAction::ModalClose.category(), Some("modal"));
/// assert!(AppAction::ModalClose.is_modal());
/// assert_eq!(AppAction::Quit.category(), None);
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    // `Variant { .. }` matches unit, tuple and struct variants alike
    let name_arms = variants.iter().map(|v| {
        let variant = &v.ident;
        let variant_str = variant.to_string();
        quote! { #name::#variant { .. } => #variant_str }
    });

    let mut expanded = quote! {
        impl tui_modal::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    if opts.infer_categories {
        let assigned: Vec<_> = variants
            .iter()
            .map(|v| {
                let category = if v.skip_category {
                    None
                } else {
                    v.category
                        .clone()
                        .or_else(|| infer_category(&v.ident.to_string()))
                };
                (&v.ident, category)
            })
            .collect();

        let mut by_category: BTreeMap<&str, Vec<&syn::Ident>> = BTreeMap::new();
        for (variant, category) in &assigned {
            if let Some(category) = category {
                by_category.entry(category.as_str()).or_default().push(variant);
            }
        }

        let category_arms = assigned.iter().map(|(variant, category)| {
            let value = match category {
                Some(c) => quote! { ::core::option::Option::Some(#c) },
                None => quote! { ::core::option::Option::None },
            };
            quote! { #name::#variant { .. } => #value }
        });

        let predicates = by_category.iter().map(|(category, members)| {
            let predicate = format_ident!("is_{}", category);
            let doc = format!("Returns true if this action is in the `{category}` category.");
            quote! {
                #[doc = #doc]
                pub fn #predicate(&self) -> bool {
                    matches!(self, #(#name::#members { .. })|*)
                }
            }
        });

        expanded.extend(quote! {
            impl tui_modal::ActionCategory for #name {
                fn category(&self) -> ::core::option::Option<&'static str> {
                    match self {
                        #(#category_arms),*
                    }
                }
            }

            impl #name {
                #(#predicates)*
            }
        });
    }

    TokenStream::from(expanded)
}

/// Derive macro for the BindingContext trait
///
/// Context names are the snake_case variant names.
///
/// # Example
/// ```ignore
/// #[derive(BindingContext, Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum KeyContext {
///     Page,
///     Dialog,
/// }
///
/// assert_eq!(KeyContext::Dialog.name(), "dialog");
/// assert_eq!(KeyContext::from_name("page"), Some(KeyContext::Page));
/// ```
#[proc_macro_derive(BindingContext)]
pub fn derive_binding_context(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let data = match &input.data {
        syn::Data::Enum(data) => data,
        _ => {
            return syn::Error::new_spanned(&input, "BindingContext can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    if let Some(variant) = data
        .variants
        .iter()
        .find(|v| !matches!(v.fields, syn::Fields::Unit))
    {
        return syn::Error::new_spanned(
            variant,
            "BindingContext can only be derived for enums with unit variants",
        )
        .to_compile_error()
        .into();
    }

    let idents: Vec<_> = data.variants.iter().map(|v| &v.ident).collect();
    let names: Vec<_> = idents
        .iter()
        .map(|v| to_snake_case(&v.to_string()))
        .collect();

    let expanded = quote! {
        impl tui_modal::BindingContext for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name::#idents => #names),*
                }
            }

            fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#names => ::core::option::Option::Some(#name::#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn all() -> &'static [Self] {
                static ALL: &[#name] = &[#(#name::#idents),*];
                ALL
            }
        }
    };

    TokenStream::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pascal_case() {
        assert_eq!(split_pascal_case("ModalOpen"), vec!["Modal", "Open"]);
        assert_eq!(
            split_pascal_case("UiTerminalResize"),
            vec!["Ui", "Terminal", "Resize"]
        );
        assert_eq!(split_pascal_case("Quit"), vec!["Quit"]);
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Dialog"), "dialog");
        assert_eq!(to_snake_case("ConfirmDialog"), "confirm_dialog");
    }

    #[test]
    fn test_infer_category() {
        assert_eq!(infer_category("ModalOpen"), Some("modal".to_string()));
        assert_eq!(infer_category("ModalClose"), Some("modal".to_string()));
        assert_eq!(infer_category("PageScrollDown"), Some("page".to_string()));
        assert_eq!(
            infer_category("ConfirmDialogShow"),
            None,
            "leading verb stays uncategorized"
        );
        assert_eq!(infer_category("UiTerminalResize"), None);
        assert_eq!(infer_category("Quit"), None);
    }
}
