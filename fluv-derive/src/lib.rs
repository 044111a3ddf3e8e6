extern crate proc_macro;

use case::CaseExt;
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{parse_macro_input, Data, DataStruct, DeriveInput, Fields, FieldsNamed, Ident, Path};

const CORE_CRATE_NAME: &str = "fluv-widgets";

/// Implements `Model<Env>` for a struct whose `ctx` field is a `Ctx` and
/// whose every other field implements `UpdateWithCtx<Env>`. The env type is
/// given with `#[model(Env)]`. A `<Name>Field` enum naming the fields is
/// generated alongside.
#[proc_macro_derive(Model, attributes(model))]
pub fn model_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let core_ident = match get_core_ident() {
        Ok(core_ident) => core_ident,
        Err(error) => return error.to_compile_error().into(),
    };
    let env_ident = match get_env_ident(&input) {
        Ok(env_ident) => env_ident,
        Err(error) => return error.to_compile_error().into(),
    };
    let named = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(FieldsNamed { named, .. }),
            ..
        }) => named,
        _ => {
            return syn::Error::new(
                input.span(),
                "#[derive(Model)] is only defined for structs with named fields",
            )
            .to_compile_error()
            .into()
        }
    };
    let has_ctx = named
        .iter()
        .any(|field| field.ident.as_ref().map_or(false, |ident| ident == "ctx"));
    if !has_ctx {
        return syn::Error::new(input.span(), "#[derive(Model)] requires a `ctx` field")
            .to_compile_error()
            .into();
    }

    let vis = &input.vis;
    let name = &input.ident;
    let field_enum_ident = format_ident!("{}Field", name);
    let fields = named
        .iter()
        .filter_map(|field| field.ident.as_ref().map(|ident| (field, ident)))
        .filter(|(_, ident)| *ident != "ctx")
        .map(|(field, ident)| {
            let variant = Ident::new(&ident.to_string().to_camel(), ident.span());
            let effects = format_ident!("{}_effects", ident);
            (field, ident, variant, effects)
        })
        .collect::<Vec<_>>();
    let field_variants = fields.iter().map(|(_, _, variant, _)| variant);
    let field_updates = fields.iter().map(|(field, ident, _, effects)| {
        quote_spanned! {field.span() =>
            let #effects = #core_ident::runtime::UpdateWithCtx::<#env_ident>::update(
                &mut self.#ident,
                msg,
                &self.ctx,
            );
        }
    });
    let changed_fields = fields.iter().map(|(_, _, variant, effects)| {
        quote! { (#effects.has_changed, #field_enum_ident::#variant) }
    });
    let joined_effects = fields.iter().map(|(_, _, _, effects)| effects);
    let field_update_arms = fields.iter().map(|(field, ident, variant, _)| {
        quote_spanned! {field.span() =>
            #field_enum_ident::#variant => #core_ident::runtime::UpdateWithCtx::<#env_ident>::update(
                &mut self.#ident,
                msg,
                &self.ctx,
            ),
        }
    });

    let expanded = quote! {
        #[derive(Clone, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize, Debug)]
        #[serde(rename_all = "snake_case")]
        #vis enum #field_enum_ident {
            Ctx,
            #(#field_variants),*
        }

        impl #core_ident::runtime::Model<#env_ident> for #name {
            type Field = #field_enum_ident;

            fn update(
                &mut self,
                msg: &#core_ident::runtime::msg::Msg,
            ) -> (
                ::std::vec::Vec<#core_ident::runtime::Effect>,
                ::std::vec::Vec<Self::Field>,
            ) {
                let ctx_effects = #core_ident::runtime::Update::<#env_ident>::update(&mut self.ctx, msg);
                #(#field_updates)*
                let fields = vec![
                    (ctx_effects.has_changed, #field_enum_ident::Ctx),
                    #(#changed_fields),*
                ]
                .into_iter()
                .filter_map(|(has_changed, field)| if has_changed { Some(field) } else { None })
                .collect::<::std::vec::Vec<_>>();
                let effects = vec![ctx_effects, #(#joined_effects),*]
                    .into_iter()
                    .flat_map(|effects| effects.into_iter())
                    .collect::<::std::vec::Vec<_>>();
                (effects, fields)
            }

            fn update_field(
                &mut self,
                msg: &#core_ident::runtime::msg::Msg,
                field: &Self::Field,
            ) -> (
                ::std::vec::Vec<#core_ident::runtime::Effect>,
                ::std::vec::Vec<Self::Field>,
            ) {
                let effects = match field {
                    #field_enum_ident::Ctx => #core_ident::runtime::Update::<#env_ident>::update(&mut self.ctx, msg),
                    #(#field_update_arms)*
                };
                let fields = if effects.has_changed {
                    vec![field.to_owned()]
                } else {
                    vec![]
                };
                (effects.into_iter().collect(), fields)
            }
        }
    };

    TokenStream::from(expanded)
}

fn get_core_ident() -> syn::Result<TokenStream2> {
    match crate_name(CORE_CRATE_NAME) {
        Ok(FoundCrate::Itself) => Ok(quote!(crate)),
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            Ok(quote!(::#ident))
        }
        Err(error) => Err(syn::Error::new(
            Span::call_site(),
            format!("{CORE_CRATE_NAME} is not a dependency: {error}"),
        )),
    }
}

fn get_env_ident(input: &DeriveInput) -> syn::Result<Path> {
    input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("model"))
        .ok_or_else(|| syn::Error::new(input.span(), "#[model(Env)] attribute is required"))?
        .parse_args::<Path>()
}
