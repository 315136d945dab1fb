use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DataStruct, DeriveInput, Field, Fields, Ident, LitStr, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

struct HooksAttribute {
    crate_path: syn::Path,
}

/// Parses the attribute in the format: `crate_path = "path::to::crate"`.
impl Parse for HooksAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Ident = input.parse()?;
        if key != "crate_path" {
            return Err(syn::Error::new(key.span(), "expected attribute `crate_path`"));
        }

        let _: Token![=] = input.parse()?;
        let value: LitStr = input.parse()?;
        let path: syn::Path = value.parse()?;

        Ok(HooksAttribute { crate_path: path })
    }
}

/// Collects the adapter names declared with `#[hook(Name)]` on a field.
fn hook_adapters(field: &Field) -> syn::Result<Vec<Ident>> {
    field
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("hook"))
        .map(|attr| attr.parse_args::<Ident>())
        .collect()
}

/// Derive macro generating intrusive list adapters.
///
/// Every field marked `#[hook(AdapterName)]` gets a zero-sized `AdapterName`
/// type implementing `Adapter`, which records the byte offset of the hook
/// inside the struct. Containers take the adapter as a type parameter, so one
/// struct can join as many containers as it has hook fields.
#[proc_macro_derive(Hooks, attributes(hooks, hook))]
pub fn hooks_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let struct_name = &input.ident;
    let vis = &input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Find absolute crate path
    let mut crate_path = quote! { ::hooklist };

    for attr in &input.attrs {
        if attr.path().is_ident("hooks") {
            match attr.parse_args::<HooksAttribute>() {
                Ok(hooks_attr) => {
                    let path = hooks_attr.crate_path;
                    crate_path = quote! { #path };
                    break;
                }
                Err(e) => return e.to_compile_error().into(),
            }
        }
    }

    let traits_path = quote! { #crate_path::linked_list::intrusive::traits };

    let fields = if let Data::Struct(DataStruct {
        fields: Fields::Named(ref fields),
        ..
    }) = input.data
    {
        &fields.named
    } else {
        return syn::Error::new_spanned(
            &input,
            "Hooks derive macro only supports structs with named fields",
        )
        .to_compile_error()
        .into();
    };

    let mut adapters: Vec<TokenStream2> = Vec::new();

    for field in fields.iter() {
        let names = match hook_adapters(field) {
            Ok(names) => names,
            Err(e) => return e.to_compile_error().into(),
        };
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let hook_type = &field.ty;

        for adapter in names {
            let doc = format!(
                "Adapter linking `{}` values through their `{}` hook.",
                struct_name, field_ident
            );
            adapters.push(quote! {
                #[doc = #doc]
                #[allow(dead_code)]
                #vis struct #adapter #impl_generics (
                    ::core::marker::PhantomData<fn() -> #struct_name #ty_generics>
                ) #where_clause;

                unsafe impl #impl_generics #traits_path::Adapter
                    for #adapter #ty_generics #where_clause
                {
                    type Value = #struct_name #ty_generics;
                    type Hook = #hook_type;

                    const OFFSET: usize =
                        ::core::mem::offset_of!(#struct_name #ty_generics, #field_ident);
                }
            });
        }
    }

    if adapters.is_empty() {
        return syn::Error::new_spanned(
            struct_name,
            "Struct must have at least one field marked `#[hook(AdapterName)]`",
        )
        .to_compile_error()
        .into();
    }

    let expanded = quote! {
        #(#adapters)*
    };

    TokenStream::from(expanded)
}
