use proc_macro2::TokenStream;
use syn::{Attribute, Ident, LitInt, parse::Parse, Token, Visibility};
use syn::parse::{ParseBuffer, ParseStream};
use syn::punctuated::Punctuated;
use syn::Result;
use quote::quote;

use crate::ast::{self, Variant};

pub struct EasyEBML {
    attrs: Vec<Attribute>,
    visibility: Visibility,
    ident: Ident,
    variants: Punctuated<EasyEBMLVariant, Token![,]>
}

impl Parse for EasyEBML {
    fn parse(input: ParseStream) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let visibility: Visibility = input.parse()?;
        input.parse::<Token![enum]>()?;
        let ident = input.parse::<Ident>()?;
        let content: ParseBuffer;
        syn::braced!(content in input);
        let variants = content.parse_terminated(EasyEBMLVariant::parse)?;
        Ok(Self {
            attrs,
            visibility,
            ident,
            variants
        })
    }
}

impl EasyEBML {

    pub fn implement(self) -> Result<TokenStream> {
        let EasyEBML { attrs, visibility, ident, variants } = self;

        let variants: Vec<Variant> = variants.into_iter().map(Variant::from_easy_ebml).collect::<Result<_>>()?;
        ast::validate(&variants)?;

        let ty = &ident;
        let spec = quote!(::zero_webm_specification);

        let declarations = variants.iter().map(|var| {
            let name = &var.ident;
            let passthrough = &var.attrs;
            quote! {
                #(#passthrough)*
                #name
            }
        });

        let get_tag = variants.iter().map(|var| {
            let name = &var.ident;
            let id = var.id;
            quote! { #id => Some(#ty::#name), }
        });

        let get_id = variants.iter().map(|var| {
            let name = &var.ident;
            let id = var.id;
            quote! { #ty::#name => #id, }
        });

        let get_name = variants.iter().map(|var| {
            let name = &var.ident;
            let text = name.to_string();
            quote! { #ty::#name => #text, }
        });

        let get_data_type = variants.iter().map(|var| {
            let name = &var.ident;
            let data_type = &var.data_type_ident;
            quote! { #ty::#name => #spec::TagDataType::#data_type, }
        });

        let get_parent = variants.iter().map(|var| {
            let name = &var.ident;
            match &var.parent {
                Some(parent) => quote! { #ty::#name => Some(#ty::#parent), },
                None => quote! { #ty::#name => None, },
            }
        });

        let unknown_size = variants.iter().filter(|var| var.unknown_size).map(|var| {
            let name = &var.ident;
            quote! { #ty::#name => true, }
        });

        let global = variants.iter().filter(|var| var.global).map(|var| {
            let name = &var.ident;
            quote! { #ty::#name => true, }
        });

        Ok(quote!(
            #(#attrs)*
            #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
            #visibility enum #ty {
                #(#declarations),*
            }

            impl #spec::EbmlSpecification for #ty {
                fn get_tag(id: u64) -> Option<Self> {
                    match id {
                        #(#get_tag)*
                        _ => None
                    }
                }

                fn get_id(&self) -> u64 {
                    match self {
                        #(#get_id)*
                    }
                }

                fn get_name(&self) -> &'static str {
                    match self {
                        #(#get_name)*
                    }
                }

                fn get_data_type(&self) -> #spec::TagDataType {
                    match self {
                        #(#get_data_type)*
                    }
                }

                fn get_parent(&self) -> Option<Self> {
                    match self {
                        #(#get_parent)*
                    }
                }

                #[allow(unreachable_patterns)]
                fn supports_unknown_size(&self) -> bool {
                    match self {
                        #(#unknown_size)*
                        _ => false
                    }
                }

                #[allow(unreachable_patterns)]
                fn is_global(&self) -> bool {
                    match self {
                        #(#global)*
                        _ => false
                    }
                }
            }

            impl ::std::fmt::Display for #ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(#spec::EbmlSpecification::get_name(self))
                }
            }
        ))
    }
}

pub struct EasyEBMLVariant {
    pub attrs: Vec<Attribute>,
    pub path: Punctuated<Ident, Token![/]>,
    pub ty: Ident,
    pub id: LitInt
}

impl Parse for EasyEBMLVariant {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let path = Punctuated::parse_separated_nonempty(input)?;
        input.parse::<Token![:]>()?;
        let ty: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let id: LitInt = input.parse()?;
        Ok(Self {
            attrs,
            path,
            ty,
            id
        })
    }
}
