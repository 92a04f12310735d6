use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Error, Fields, GenericParam, Ident, Type, WhereClause,
    parse_quote, spanned::Spanned,
};

// -----------------------------------------------------------------------------
// Attribute grammar

#[derive(Default)]
struct TypeFlags {
    default: bool,
    clone: bool,
}

fn parse_type_flags(attrs: &[Attribute]) -> syn::Result<TypeFlags> {
    let mut flags = TypeFlags::default();
    for attr in attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                flags.default = true;
                Ok(())
            } else if meta.path.is_ident("clone") {
                flags.clone = true;
                Ok(())
            } else {
                Err(meta.error("expected `default` or `clone`"))
            }
        })?;
    }
    Ok(flags)
}

fn field_is_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skipped = false;
    for attr in attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skipped = true;
                Ok(())
            } else {
                Err(meta.error("expected `skip`"))
            }
        })?;
    }
    Ok(skipped)
}

// -----------------------------------------------------------------------------
// Expansion

struct ActiveField {
    ident: Ident,
    name: String,
    ty: Type,
}

pub(crate) fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(_) => {
            return Err(Error::new(
                input.ident.span(),
                "`#[derive(Reflect)]` supports structs; model alternatives as \
                 `Option` or separate aggregates",
            ));
        }
        Data::Union(_) => {
            return Err(Error::new(
                input.ident.span(),
                "`#[derive(Reflect)]` does not support unions",
            ));
        }
    };

    for param in &input.generics.params {
        match param {
            GenericParam::Type(_) => {}
            GenericParam::Lifetime(param) => {
                return Err(Error::new(
                    param.span(),
                    "`#[derive(Reflect)]` requires `'static` data; remove the lifetime",
                ));
            }
            GenericParam::Const(param) => {
                return Err(Error::new(
                    param.span(),
                    "`#[derive(Reflect)]` does not support const generics",
                ));
            }
        }
    }

    let fields = match &data.fields {
        Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(Error::new(
                input.ident.span(),
                "`#[derive(Reflect)]` supports named-field or unit structs",
            ));
        }
    };

    let flags = parse_type_flags(&input.attrs)?;

    let mut active = Vec::new();
    for field in fields {
        if field_is_skipped(&field.attrs)? {
            continue;
        }
        let ident = field.ident.clone().expect("named field");
        active.push(ActiveField {
            name: ident.to_string(),
            ident,
            ty: field.ty.clone(),
        });
    }

    let ident = &input.ident;
    let generics = &input.generics;
    let is_generic = generics.type_params().next().is_some();

    // Every active field type carries the full reflection surface; type
    // parameters additionally satisfy what `Self: Reflect` needs.
    let mut where_clause: WhereClause = generics
        .where_clause
        .clone()
        .unwrap_or_else(|| parse_quote!(where));

    let mut seen = HashSet::new();
    let unique_field_types: Vec<&Type> = active
        .iter()
        .map(|field| &field.ty)
        .filter(|ty| seen.insert(quote!(#ty).to_string()))
        .collect();

    for ty in &unique_field_types {
        where_clause.predicates.push(parse_quote! {
            #ty: ::replica_reflect::Reflect
                + ::replica_reflect::info::Typed
                + ::replica_reflect::info::TypePath
                + ::replica_reflect::FromValue
                + ::replica_reflect::registry::GetTypeRecord
        });
    }
    for param in generics.type_params() {
        let param = &param.ident;
        where_clause.predicates.push(parse_quote! {
            #param: ::replica_reflect::info::TypePath
                + ::core::marker::Send
                + ::core::marker::Sync
                + 'static
        });
    }

    let (impl_generics, ty_generics, _) = generics.split_for_impl();

    // The clone and default hooks call into `Clone` / `Default`, so the
    // impls carrying them state that requirement outright.
    let mut reflect_where = where_clause.clone();
    if flags.clone {
        reflect_where.predicates.push(parse_quote! {
            #ident #ty_generics: ::core::clone::Clone
        });
    }
    let mut record_where = where_clause.clone();
    if flags.default {
        record_where.predicates.push(parse_quote! {
            #ident #ty_generics: ::core::default::Default
        });
    }

    // An empty clause is dropped entirely rather than printed bare.
    let where_clause = non_empty(where_clause);
    let where_clause = where_clause.as_ref();
    let reflect_where = non_empty(reflect_where);
    let reflect_where = reflect_where.as_ref();
    let record_where = non_empty(record_where);
    let record_where = record_where.as_ref();

    let type_path_impl = expand_type_path(ident, generics, is_generic, where_clause);
    let typed_impl = expand_typed(ident, is_generic, &active, &impl_generics, &ty_generics, where_clause);
    let reflect_impl = expand_reflect(ident, &flags, &active, &impl_generics, &ty_generics, reflect_where);
    let aggregate_impl = expand_aggregate(ident, &active, &impl_generics, &ty_generics, where_clause);
    let from_value_impl = quote! {
        impl #impl_generics ::replica_reflect::FromValue for #ident #ty_generics #where_clause {
            #[inline]
            fn from_boxed(
                value: ::std::boxed::Box<dyn ::replica_reflect::Reflect>,
            ) -> ::core::result::Result<Self, ::std::boxed::Box<dyn ::replica_reflect::Reflect>>
            {
                value.take::<Self>()
            }
        }
    };
    let record_impl = expand_record(ident, &flags, &unique_field_types, &impl_generics, &ty_generics, record_where);

    let auto_register = if cfg!(feature = "auto_register") && !is_generic {
        quote! { ::replica_reflect::auto_register!(#ident); }
    } else {
        TokenStream::new()
    };

    Ok(quote! {
        #type_path_impl
        #typed_impl
        #reflect_impl
        #aggregate_impl
        #from_value_impl
        #record_impl
        #auto_register
    })
}

fn non_empty(where_clause: WhereClause) -> Option<WhereClause> {
    (!where_clause.predicates.is_empty()).then_some(where_clause)
}

// -----------------------------------------------------------------------------
// Per-trait expansion

fn expand_type_path(
    ident: &Ident,
    generics: &syn::Generics,
    is_generic: bool,
    where_clause: Option<&WhereClause>,
) -> TokenStream {
    let name = ident.to_string();
    let (impl_generics, ty_generics, _) = generics.split_for_impl();

    if !is_generic {
        return quote! {
            impl #impl_generics ::replica_reflect::info::TypePath for #ident #ty_generics #where_clause {
                #[inline]
                fn type_path() -> &'static str {
                    ::core::concat!(::core::module_path!(), "::", #name)
                }

                #[inline]
                fn type_name() -> &'static str {
                    #name
                }
            }
        };
    }

    let params: Vec<&Ident> = generics.type_params().map(|param| &param.ident).collect();
    quote! {
        impl #impl_generics ::replica_reflect::info::TypePath for #ident #ty_generics #where_clause {
            fn type_path() -> &'static str {
                static CELL: ::replica_reflect::info::GenericTypePathCell =
                    ::replica_reflect::info::GenericTypePathCell::new();
                CELL.get_or_insert::<Self, _>(|| {
                    let args = [
                        #(<#params as ::replica_reflect::info::TypePath>::type_path()),*
                    ]
                    .join(", ");
                    ::std::format!("{}::{}<{}>", ::core::module_path!(), #name, args)
                })
                .as_str()
            }

            fn type_name() -> &'static str {
                static CELL: ::replica_reflect::info::GenericTypePathCell =
                    ::replica_reflect::info::GenericTypePathCell::new();
                CELL.get_or_insert::<Self, _>(|| {
                    let args = [
                        #(<#params as ::replica_reflect::info::TypePath>::type_name()),*
                    ]
                    .join(", ");
                    ::std::format!("{}<{}>", #name, args)
                })
                .as_str()
            }
        }
    }
}

fn expand_typed(
    ident: &Ident,
    is_generic: bool,
    active: &[ActiveField],
    impl_generics: &syn::ImplGenerics<'_>,
    ty_generics: &syn::TypeGenerics<'_>,
    where_clause: Option<&WhereClause>,
) -> TokenStream {
    let field_infos = active.iter().map(|field| {
        let name = &field.name;
        let ty = &field.ty;
        quote! { ::replica_reflect::info::FieldInfo::new::<#ty>(#name) }
    });

    let build = quote! {
        ::replica_reflect::info::TypeInfo::Plain(
            ::replica_reflect::info::AggregateInfo::new::<Self>(
                ::std::vec![ #(#field_infos),* ],
            ),
        )
    };

    let body = if is_generic {
        quote! {
            static CELL: ::replica_reflect::info::GenericTypeInfoCell =
                ::replica_reflect::info::GenericTypeInfoCell::new();
            CELL.get_or_insert::<Self, _>(|| #build)
        }
    } else {
        quote! {
            static CELL: ::replica_reflect::info::NonGenericTypeInfoCell =
                ::replica_reflect::info::NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| #build)
        }
    };

    quote! {
        impl #impl_generics ::replica_reflect::info::Typed for #ident #ty_generics #where_clause {
            fn type_info() -> &'static ::replica_reflect::info::TypeInfo {
                #body
            }
        }
    }
}

fn expand_reflect(
    ident: &Ident,
    flags: &TypeFlags,
    active: &[ActiveField],
    impl_generics: &syn::ImplGenerics<'_>,
    ty_generics: &syn::TypeGenerics<'_>,
    where_clause: Option<&WhereClause>,
) -> TokenStream {
    let clone_body = if flags.clone {
        quote! {
            ::core::result::Result::Ok(::std::boxed::Box::new(
                ::core::clone::Clone::clone(self),
            ))
        }
    } else {
        quote! {
            ::core::result::Result::Err(
                ::replica_reflect::error::ConstructionError::CloneUnsupported {
                    type_path: ::std::borrow::Cow::Borrowed(
                        <Self as ::replica_reflect::info::TypePath>::type_path(),
                    ),
                },
            )
        }
    };

    let debug_fields = active.iter().map(|field| {
        let name = &field.name;
        let ident = &field.ident;
        quote! { .field(#name, &(&self.#ident as &dyn ::replica_reflect::Reflect)) }
    });

    quote! {
        impl #impl_generics ::replica_reflect::Reflect for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_type_path(&self) -> &'static str {
                <Self as ::replica_reflect::info::TypePath>::type_path()
            }

            #[inline]
            fn reflect_type_info(&self) -> &'static ::replica_reflect::info::TypeInfo {
                <Self as ::replica_reflect::info::Typed>::type_info()
            }

            #[inline]
            fn kind(&self) -> ::replica_reflect::info::Kind {
                ::replica_reflect::info::Kind::Plain
            }

            #[inline]
            fn view(&self) -> ::replica_reflect::ops::ValueRef<'_> {
                ::replica_reflect::ops::ValueRef::Plain(self)
            }

            #[inline]
            fn view_mut(&mut self) -> ::replica_reflect::ops::ValueMut<'_> {
                ::replica_reflect::ops::ValueMut::Plain(self)
            }

            fn clone_boxed(
                &self,
            ) -> ::core::result::Result<
                ::std::boxed::Box<dyn ::replica_reflect::Reflect>,
                ::replica_reflect::error::ConstructionError,
            > {
                #clone_body
            }

            fn debug_fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct(<Self as ::replica_reflect::info::TypePath>::type_name())
                    #(#debug_fields)*
                    .finish()
            }
        }
    }
}

fn expand_aggregate(
    ident: &Ident,
    active: &[ActiveField],
    impl_generics: &syn::ImplGenerics<'_>,
    ty_generics: &syn::TypeGenerics<'_>,
    where_clause: Option<&WhereClause>,
) -> TokenStream {
    let len = active.len();
    let indices: Vec<usize> = (0..len).collect();
    let names: Vec<&String> = active.iter().map(|field| &field.name).collect();
    let idents: Vec<&Ident> = active.iter().map(|field| &field.ident).collect();
    let types: Vec<&Type> = active.iter().map(|field| &field.ty).collect();

    // Field-less aggregates never touch the incoming value.
    let value_param = if active.is_empty() {
        quote!(_value)
    } else {
        quote!(value)
    };

    quote! {
        impl #impl_generics ::replica_reflect::ops::Aggregate for #ident #ty_generics #where_clause {
            #[inline]
            fn field_len(&self) -> usize {
                #len
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&'static str> {
                match index {
                    #(#indices => ::core::option::Option::Some(#names),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(
                &self,
                index: usize,
            ) -> ::core::option::Option<&dyn ::replica_reflect::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::replica_reflect::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field(&self, name: &str) -> ::core::option::Option<&dyn ::replica_reflect::Reflect> {
                match name {
                    #(#names => ::core::option::Option::Some(&self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<&mut dyn ::replica_reflect::Reflect> {
                match name {
                    #(#names => ::core::option::Option::Some(&mut self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set_field(
                &mut self,
                name: &str,
                #value_param: ::std::boxed::Box<dyn ::replica_reflect::Reflect>,
            ) -> ::core::result::Result<(), ::replica_reflect::error::FieldAccessError> {
                match name {
                    #(
                    #names => {
                        match <#types as ::replica_reflect::FromValue>::from_boxed(#value_param) {
                            ::core::result::Result::Ok(converted) => {
                                self.#idents = converted;
                                ::core::result::Result::Ok(())
                            }
                            ::core::result::Result::Err(value) => {
                                ::core::result::Result::Err(
                                    ::replica_reflect::error::FieldAccessError::type_mismatch(
                                        <Self as ::replica_reflect::info::TypePath>::type_path(),
                                        #names,
                                        <#types as ::replica_reflect::info::TypePath>::type_path(),
                                        value.reflect_type_path(),
                                    ),
                                )
                            }
                        }
                    }
                    )*
                    _ => ::core::result::Result::Err(
                        ::replica_reflect::error::FieldAccessError::no_such_field(
                            <Self as ::replica_reflect::info::TypePath>::type_path(),
                            name,
                        ),
                    ),
                }
            }
        }
    }
}

fn expand_record(
    ident: &Ident,
    flags: &TypeFlags,
    unique_field_types: &[&Type],
    impl_generics: &syn::ImplGenerics<'_>,
    ty_generics: &syn::TypeGenerics<'_>,
    where_clause: Option<&WhereClause>,
) -> TokenStream {
    let with_default = flags.default.then(|| quote! { .with_default::<Self>() });

    quote! {
        impl #impl_generics ::replica_reflect::registry::GetTypeRecord for #ident #ty_generics #where_clause {
            fn get_type_record() -> ::replica_reflect::registry::TypeRecord {
                ::replica_reflect::registry::TypeRecord::of::<Self>() #with_default
            }

            fn register_dependencies(registry: &mut ::replica_reflect::registry::TypeRegistry) {
                #(registry.register::<#unique_field_types>();)*
            }
        }
    }
}
