use std::collections::HashMap;
use syn::{Attribute, Error, Ident, Result};
use zero_webm_specification::TagDataType;

use crate::easy_ebml::EasyEBMLVariant;

pub struct Variant {
    pub ident: Ident,
    pub attrs: Vec<Attribute>,
    pub id: u64,
    pub data_type: TagDataType,
    pub data_type_ident: Ident,
    pub parent: Option<Ident>,
    pub unknown_size: bool,
    pub global: bool,
}

impl Variant {
    pub fn from_easy_ebml(node: EasyEBMLVariant) -> Result<Self> {
        let EasyEBMLVariant { attrs, mut path, ty, id } = node;

        let ident = path.pop().ok_or_else(|| Error::new(ty.span(), "easy_ebml enum variant must be at least: `Name: Type = id`"))?.into_value();
        let parent = path.pop().map(|it| it.into_value());

        let data_type = match ty.to_string().as_str() {
            "Master" => TagDataType::Master,
            "UnsignedInt" => TagDataType::UnsignedInt,
            "Integer" => TagDataType::Integer,
            "Utf8" => TagDataType::Utf8,
            "Binary" => TagDataType::Binary,
            "Float" => TagDataType::Float,
            other => return Err(Error::new_spanned(&ty, format!("unknown data type \"{}\"", other))),
        };

        let id_value = id.base10_parse::<u64>()?;
        if id_value == 0 || id_value > 0xFFFF_FFFF {
            return Err(Error::new_spanned(&id, "tag ids must be between 1 and 4 bytes long"));
        }

        let mut unknown_size = false;
        let mut global = false;
        let mut passthrough = Vec::new();
        for attr in attrs {
            if attr.path.is_ident("unknown_size") {
                if unknown_size {
                    return Err(Error::new_spanned(&attr, "duplicate #[unknown_size] attribute"));
                }
                unknown_size = true;
            } else if attr.path.is_ident("global") {
                if global {
                    return Err(Error::new_spanned(&attr, "duplicate #[global] attribute"));
                }
                global = true;
            } else {
                passthrough.push(attr);
            }
        }

        if unknown_size && data_type != TagDataType::Master {
            return Err(Error::new_spanned(&ident, "#[unknown_size] is only allowed on Master tags"));
        }

        if global && parent.is_some() {
            return Err(Error::new_spanned(&ident, "#[global] tags cannot declare a parent"));
        }

        Ok(Variant {
            ident,
            attrs: passthrough,
            id: id_value,
            data_type,
            data_type_ident: ty,
            parent,
            unknown_size,
            global,
        })
    }
}

pub fn validate(variants: &[Variant]) -> Result<()> {
    let mut used_ids = HashMap::<u64, &Variant>::new();
    for var in variants {
        if let Some(original) = used_ids.insert(var.id, var) {
            let mut err = Error::new_spanned(&var.ident, format!("duplicate id 0x{:x} detected", var.id));
            err.combine(Error::new_spanned(&original.ident, format!("0x{:x} already used previously", var.id)));
            return Err(err);
        }
    }

    let mut map = HashMap::<String, &Variant>::new();
    for var in variants {
        if map.insert(var.ident.to_string(), var).is_some() {
            return Err(Error::new_spanned(&var.ident, format!("duplicate tag name {}", var.ident)));
        }
    }

    for var in variants {
        if let Some(parent) = &var.parent {
            match map.get(&parent.to_string()) {
                None => return Err(Error::new_spanned(parent, format!("parent {} is not declared", parent))),
                Some(it) if it.data_type != TagDataType::Master => {
                    return Err(Error::new_spanned(parent, "Parents must be of Master type"));
                },
                Some(_) => {},
            }
        }
    }

    // A chain longer than the number of tags must revisit one of them
    for origin in variants {
        let chain_length = itertools::unfold(Some(origin), |state| {
            if let Some(var) = *state {
                *state = var.parent.as_ref().and_then(|ident| map.get(&ident.to_string()).copied());
                Some(var.id)
            } else {
                None
            }
        }).take(variants.len() + 1).count();

        if chain_length > variants.len() {
            return Err(Error::new_spanned(&origin.ident, format!("parent chain of {} is circular", origin.ident)));
        }
    }

    Ok(())
}
