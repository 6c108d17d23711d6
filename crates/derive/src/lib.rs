//! `#[derive(Record)]` for fauna-wire.
//!
//! Use it through the re-export in `fauna_wire`; the expansion names
//! `::fauna_wire` paths.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Field, Fields, Generics, Ident, LitStr, Token, Type,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    parse_macro_input, parse_quote,
    punctuated::Punctuated,
};

/// Derives `Encode`, `Decode` and `Record` for a struct with named fields.
///
/// Each field maps to an object key. The key defaults to the field name and
/// is controlled with `#[fauna(...)]`:
///
/// - `#[fauna("key")]` stores the field under `key`;
/// - `#[fauna("-")]` leaves the field out of the wire form (it decodes to
///   its `Default`);
/// - `#[fauna(required)]` makes an absent or null key a decode error; it can
///   be combined with a key, as in `#[fauna("Name", required)]`.
///
/// Fields that are not required must implement `Default`, which they take
/// when their key is absent or null. `required` is rejected on `Option`
/// fields.
///
/// # Example
///
/// ```ignore
/// #[derive(Record)]
/// struct Spell {
///     #[fauna("Name", required)]
///     name: String,
///     #[fauna("-")]
///     cached_len: usize,
///     level: Option<i32>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(fauna))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// One argument of a `#[fauna(...)]` attribute.
enum FaunaArg {
    Key(LitStr),
    Flag(Ident),
}

impl Parse for FaunaArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            input.parse().map(FaunaArg::Key)
        } else {
            input.parse().map(FaunaArg::Flag)
        }
    }
}

/// A field after its attributes have been read.
struct RecordField<'a> {
    ident: &'a Ident,
    name: String,
    annotation: Option<String>,
    required: bool,
}

impl RecordField<'_> {
    fn is_excluded(&self) -> bool {
        self.annotation.as_deref() == Some("-")
    }
}

fn derive_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ));
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Record only supports structs")),
    };

    let fields = fields
        .iter()
        .map(read_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let record_name = name.to_string();
    let specs = fields.iter().map(|field| {
        let field_name = &field.name;
        let annotation = match &field.annotation {
            Some(annotation) => quote! { ::core::option::Option::Some(#annotation) },
            None => quote! { ::core::option::Option::None },
        };
        let required = field.required;
        quote! {
            ::fauna_wire::mapper::FieldSpec::new(#field_name, #annotation, #required)
        }
    });

    let mut encode_fields = Vec::new();
    let mut decode_fields = Vec::new();
    let mut index = 0usize;
    for field in &fields {
        let ident = field.ident;
        if field.is_excluded() {
            decode_fields.push(quote! {
                #ident: ::core::default::Default::default()
            });
            continue;
        }
        encode_fields.push(quote! {
            ::fauna_wire::mapper::encode_field(&mut object, descriptor.field(#index), &self.#ident)?;
        });
        decode_fields.push(if field.required {
            quote! {
                #ident: ::fauna_wire::mapper::decode_required_field(
                    object,
                    descriptor,
                    descriptor.field(#index),
                )?
            }
        } else {
            quote! {
                #ident: ::fauna_wire::mapper::decode_field(object, descriptor.field(#index))?
            }
        });
        index += 1;
    }

    // Encode and Decode both go through `Record::descriptor`, so every impl
    // carries the bounds `Record` needs.
    let bounded = with_bound(
        &input.generics,
        quote! { ::fauna_wire::mapper::Encode + ::fauna_wire::mapper::Decode },
    );
    let (impl_generics, _, where_clause) = bounded.split_for_impl();
    let (_, ty_generics, _) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::fauna_wire::mapper::Record for #name #ty_generics #where_clause {
            fn descriptor() -> &'static ::fauna_wire::mapper::TypeDescriptor {
                static DESCRIPTOR: ::fauna_wire::mapper::DescriptorCell =
                    ::fauna_wire::mapper::DescriptorCell::new();
                DESCRIPTOR.get_or_build(#record_name, &[#(#specs),*])
            }
        }

        impl #impl_generics ::fauna_wire::mapper::Encode for #name #ty_generics #where_clause {
            #[allow(unused_mut, unused_variables)]
            fn encode(
                &self,
            ) -> ::core::result::Result<::fauna_wire::value::Value, ::fauna_wire::mapper::EncodeError> {
                let descriptor = <Self as ::fauna_wire::mapper::Record>::descriptor();
                let mut object = ::fauna_wire::value::Object::with_capacity(descriptor.len());
                #(#encode_fields)*
                ::core::result::Result::Ok(::fauna_wire::value::Value::Object(object))
            }
        }

        impl #impl_generics ::fauna_wire::mapper::Decode for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn decode(
                value: &::fauna_wire::value::Value,
            ) -> ::core::result::Result<Self, ::fauna_wire::mapper::DecodeError> {
                let descriptor = <Self as ::fauna_wire::mapper::Record>::descriptor();
                let object = ::fauna_wire::mapper::record_object::<Self>(value)?;
                ::core::result::Result::Ok(Self {
                    #(#decode_fields),*
                })
            }
        }
    })
}

fn read_field(field: &Field) -> syn::Result<RecordField<'_>> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;

    let mut annotation: Option<LitStr> = None;
    let mut required = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("fauna") {
            continue;
        }
        let args = attr.parse_args_with(Punctuated::<FaunaArg, Token![,]>::parse_terminated)?;
        for arg in args {
            match arg {
                FaunaArg::Key(key) => {
                    if annotation.is_some() {
                        return Err(syn::Error::new_spanned(key, "duplicate field key"));
                    }
                    annotation = Some(key);
                }
                FaunaArg::Flag(flag) if flag == "required" => required = true,
                FaunaArg::Flag(flag) => {
                    return Err(syn::Error::new_spanned(
                        &flag,
                        format!("unknown fauna attribute '{flag}' (expected a key string or 'required')"),
                    ));
                }
            }
        }
    }

    if required {
        if let Some(key) = annotation.as_ref().filter(|key| key.value() == "-") {
            return Err(syn::Error::new_spanned(
                key,
                "an excluded field cannot be required",
            ));
        }
        if is_option(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "`required` cannot be used on an Option field",
            ));
        }
    }

    Ok(RecordField {
        ident,
        name: ident.unraw().to_string(),
        annotation: annotation.map(|key| key.value()),
        required,
    })
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        Type::Group(group) => is_option(&group.elem),
        Type::Paren(paren) => is_option(&paren.elem),
        _ => false,
    }
}

fn with_bound(generics: &Generics, bound: TokenStream2) -> Generics {
    let mut generics = generics.clone();
    let params: Vec<Ident> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    if params.is_empty() {
        return generics;
    }
    let where_clause = generics.make_where_clause();
    for param in params {
        where_clause.predicates.push(parse_quote! { #param: #bound });
    }
    generics
}
