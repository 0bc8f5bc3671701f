//! Package labels, stereotypes and colors

use crate::core::{DiagramConfig, Module};

/// Package title with its `{…}` tag line
///
/// Descriptive labels show the short description and move the technical
/// name into the tags.
pub fn package_label(module: &Module, config: &DiagramConfig) -> String {
    let mut tags = Vec::new();
    if module.auto_install {
        tags.push("auto-install".to_string());
    }
    if config.show_package_status {
        tags.push(format!("state='{}'", module.state));
    }

    if config.show_descriptive_name {
        tags.insert(0, format!("name={}", module.name));
        return format!("{}\\n{{{}}}", module.short_desc, tags.join(", "));
    }
    if tags.is_empty() {
        module.name.clone()
    } else {
        format!("{}\\n{{{}}}", module.name, tags.join(", "))
    }
}

pub fn package_stereotype<'c>(module: &Module, config: &'c DiagramConfig) -> &'c str {
    if module.application {
        &config.module_application_stereotype
    } else {
        &config.module_module_stereotype
    }
}

pub fn package_color<'c>(module: &Module, config: &'c DiagramConfig) -> &'c str {
    if module.application {
        &config.color_application_package
    } else {
        &config.color_module_package
    }
}

/// Summary and author note text
pub fn description_note(module: &Module) -> String {
    format!(
        "<b>Summary</b>: {}\\n<b>Author</b>: {}",
        module.summary, module.author
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ModuleState;

    #[test]
    fn test_label_default() {
        let module = Module::new("sale");
        assert_eq!(
            package_label(&module, &DiagramConfig::default()),
            "sale\\n{state='installed'}"
        );
    }

    #[test]
    fn test_label_without_tags() {
        let config = DiagramConfig {
            show_package_status: false,
            ..DiagramConfig::default()
        };
        assert_eq!(package_label(&Module::new("sale"), &config), "sale");
    }

    #[test]
    fn test_label_auto_install_and_state() {
        let mut module = Module::new("sale_stock").with_state(ModuleState::ToUpgrade);
        module.auto_install = true;
        assert_eq!(
            package_label(&module, &DiagramConfig::default()),
            "sale_stock\\n{auto-install, state='to upgrade'}"
        );
    }

    #[test]
    fn test_label_descriptive() {
        let module = Module::new("sale").with_description("Sales Management", "", "");
        let config = DiagramConfig {
            show_descriptive_name: true,
            show_package_status: false,
            ..DiagramConfig::default()
        };
        assert_eq!(package_label(&module, &config), "Sales Management\\n{name=sale}");
    }

    #[test]
    fn test_stereotype_and_color() {
        let config = DiagramConfig::default();
        let app = Module::new("sale").with_application(true);
        let plain = Module::new("base");
        assert_eq!(package_stereotype(&app, &config), "application");
        assert_eq!(package_stereotype(&plain, &config), "module");
        assert_eq!(package_color(&app, &config), "#Silver");
        assert_eq!(package_color(&plain, &config), "#White");
    }

    #[test]
    fn test_description_note() {
        let module = Module::new("sale").with_description("", "Quotations", "Acme");
        assert_eq!(
            description_note(&module),
            "<b>Summary</b>: Quotations\\n<b>Author</b>: Acme"
        );
    }
}
