//! Class display names and stereotypes

use crate::core::creole::{bold, italic};
use crate::core::{DiagramConfig, ModelKind};

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `sale.order_line` becomes `SaleOrderLine`
pub fn camel_case(dotted: &str) -> String {
    dotted.replace('_', ".").split('.').map(capitalize).collect()
}

/// Bold class name, as used for attribute types
pub fn type_name(model: &str) -> String {
    bold(&camel_case(model))
}

/// Display name of a class block
///
/// `original` adds the dotted name as a `{name='…'}` tag, `external` adds a
/// `(from **module**)` line. Line breaks are PlantUML `\n` escapes.
pub fn class_name(model: &str, kind: ModelKind, original: bool, external: Option<&str>) -> String {
    let mut name = camel_case(model);
    if kind == ModelKind::Abstract {
        name = italic(&name);
    }
    if original {
        name.push_str(&format!("\\n{{name='{}'}}", model));
    }
    if let Some(module) = external {
        name.push_str(&format!("\\n//(from **{}**)//", module));
    }
    name
}

/// Stereotype, icon glyph and icon color of a class block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStereotype {
    pub stereotype: &'static str,
    pub icon: char,
    pub icon_color: String,
}

impl ModelStereotype {
    pub fn of(kind: ModelKind, config: &DiagramConfig) -> Self {
        match kind {
            ModelKind::Regular => Self {
                stereotype: "model",
                icon: 'M',
                icon_color: config.color_normal_model_icon.clone(),
            },
            ModelKind::Transient => Self {
                stereotype: "transient",
                icon: 'W',
                icon_color: config.color_transient_model_icon.clone(),
            },
            ModelKind::Abstract => Self {
                stereotype: "abstract",
                icon: 'A',
                icon_color: config.color_abstract_model_icon.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("sale.order"), "SaleOrder");
        assert_eq!(camel_case("sale.order_line"), "SaleOrderLine");
        assert_eq!(camel_case("res.PARTNER"), "ResPartner");
        assert_eq!(camel_case("a..b"), "AB");
    }

    #[test]
    fn test_class_name_variants() {
        assert_eq!(class_name("a.b", ModelKind::Regular, false, None), "AB");
        assert_eq!(class_name("a.b", ModelKind::Abstract, false, None), "//AB//");
        assert_eq!(
            class_name("a.b", ModelKind::Regular, true, None),
            "AB\\n{name='a.b'}"
        );
        assert_eq!(
            class_name("res.partner", ModelKind::Regular, false, Some("base")),
            "ResPartner\\n//(from **base**)//"
        );
    }

    #[test]
    fn test_stereotypes() {
        let config = DiagramConfig::default();
        let regular = ModelStereotype::of(ModelKind::Regular, &config);
        assert_eq!((regular.stereotype, regular.icon), ("model", 'M'));
        assert_eq!(regular.icon_color, "Darkorange");
        let transient = ModelStereotype::of(ModelKind::Transient, &config);
        assert_eq!((transient.stereotype, transient.icon), ("transient", 'W'));
        assert_eq!(transient.icon_color, "SteelBlue");
        let abstract_model = ModelStereotype::of(ModelKind::Abstract, &config);
        assert_eq!((abstract_model.stereotype, abstract_model.icon), ("abstract", 'A'));
        assert_eq!(abstract_model.icon_color, "Gray");
    }
}
