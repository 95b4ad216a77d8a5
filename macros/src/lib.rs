use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derives the `Placeholder` trait for enums.
///
/// Each unit variant becomes one template variable. The tag is the variant
/// name converted to `SCREAMING_SNAKE_CASE`, so `LowerTemp` matches the
/// `%LOWER_TEMP%` marker in a page.
///
/// # Example
///
/// ```ignore
/// use cellarstat_macros::Placeholder;
///
/// #[derive(Copy, Clone, PartialEq, Eq, Placeholder)]
/// pub enum PageVar {
///     Temp,
///     LowerTemp,
/// }
/// ```
///
/// This generates:
///
/// ```ignore
/// impl Placeholder for PageVar {
///     const ALL: &'static [Self] = &[Self::Temp, Self::LowerTemp];
///
///     fn from_tag(tag: &str) -> Option<Self> {
///         match tag {
///             "TEMP" => Some(Self::Temp),
///             "LOWER_TEMP" => Some(Self::LowerTemp),
///             _ => None,
///         }
///     }
///
///     fn tag(&self) -> &'static str {
///         match self {
///             Self::Temp => "TEMP",
///             Self::LowerTemp => "LOWER_TEMP",
///         }
///     }
/// }
/// ```
///
/// # Requirements
///
/// - The type must be an enum
/// - All variants must be unit variants (no fields)
#[proc_macro_derive(Placeholder)]
pub fn derive_placeholder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let variants = match &input.data {
        Data::Enum(data_enum) => &data_enum.variants,
        _ => {
            return syn::Error::new_spanned(&input, "Placeholder can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new_spanned(
                variant,
                "Placeholder can only be derived for enums with unit variants (no fields)",
            )
            .to_compile_error()
            .into();
        }
    }

    let all = variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        quote! { Self::#variant_name }
    });

    let from_tag_arms = variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let tag = screaming_snake(&variant_name.to_string());
        quote! {
            #tag => Some(Self::#variant_name)
        }
    });

    let tag_arms = variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let tag = screaming_snake(&variant_name.to_string());
        quote! {
            Self::#variant_name => #tag
        }
    });

    let expanded = quote! {
        impl ::cellarstat::template::Placeholder for #name {
            const ALL: &'static [Self] = &[#(#all,)*];

            fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    #(#from_tag_arms,)*
                    _ => None,
                }
            }

            fn tag(&self) -> &'static str {
                match self {
                    #(#tag_arms,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// `LowerTemp` -> `LOWER_TEMP`, `Temp` -> `TEMP`.
fn screaming_snake(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, c) in ident.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(c.to_uppercase());
    }
    out
}
