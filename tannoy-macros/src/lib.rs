use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive macro for implementing the `Event` trait.
///
/// For enums, every variant maps to its own topic; for structs, the whole
/// container maps to a single topic. Topic names default to the variant (or
/// type) identifier and can be overridden with the `#[topic("...")]` helper
/// attribute:
///
/// ```rust,ignore
/// #[derive(Clone, Event)]
/// enum AppEvent {
///     #[topic("user.created")]
///     Created(u64),
///     Deleted { id: u64 },   // topic "Deleted"
///     Ping,                  // topic "Ping"
/// }
/// ```
///
/// For structs the attribute goes on the container:
///
/// ```rust,ignore
/// #[derive(Clone, Event)]
/// #[topic("tick")]
/// struct Tick;
/// ```
#[proc_macro_derive(Event, attributes(topic))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Enum(data) => {
            if data.variants.is_empty() {
                quote! { match *self {} }
            } else {
                let mut arms = Vec::new();
                for variant in &data.variants {
                    let variant_name = &variant.ident;
                    let topic = match topic_override(&variant.attrs) {
                        Ok(Some(topic)) => topic,
                        Ok(None) => variant_name.to_string(),
                        Err(err) => return err.to_compile_error().into(),
                    };
                    let lit = LitStr::new(&topic, variant_name.span());
                    arms.push(match &variant.fields {
                        Fields::Unnamed(_) => quote! {
                            #name::#variant_name(..) => ::tannoy::Topic::new(#lit)
                        },
                        Fields::Unit => quote! {
                            #name::#variant_name => ::tannoy::Topic::new(#lit)
                        },
                        Fields::Named(_) => quote! {
                            #name::#variant_name { .. } => ::tannoy::Topic::new(#lit)
                        },
                    });
                }
                quote! {
                    match self {
                        #(#arms),*
                    }
                }
            }
        }
        Data::Struct(_) => {
            let topic = match topic_override(&input.attrs) {
                Ok(Some(topic)) => topic,
                Ok(None) => name.to_string(),
                Err(err) => return err.to_compile_error().into(),
            };
            let lit = LitStr::new(&topic, name.span());
            quote! { ::tannoy::Topic::new(#lit) }
        }
        Data::Union(_) => {
            return syn::Error::new_spanned(
                &input,
                "Event can only be derived for enums and structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let expanded = quote! {
        impl #impl_generics ::tannoy::Event for #name #ty_generics #where_clause {
            fn topic(&self) -> ::tannoy::Topic {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}

fn topic_override(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    for attr in attrs {
        if attr.path().is_ident("topic") {
            let lit: LitStr = attr.parse_args()?;
            return Ok(Some(lit.value()));
        }
    }
    Ok(None)
}
