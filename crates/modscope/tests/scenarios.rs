//! End-to-end diagram scenarios
//!
//! Each test builds a small snapshot and checks the generated PlantUML text
//! through the public API only.

use modscope::prelude::*;
use modscope::{class_diagram, inverse_package_diagram, package_diagram, OnDelete};

fn class(snapshot: &Snapshot, module: &str) -> String {
    let config = DiagramConfig::default();
    let subject = snapshot.module(module).unwrap();
    let mut generator = ClassDiagramGenerator::new(snapshot, subject, &config);
    generator.generate().to_string()
}

#[test]
fn test_uninstalled_empty_module_gets_notes() {
    let snapshot =
        Snapshot::new().with_module(Module::new("x").with_state(ModuleState::Uninstalled));
    let output = class(&snapshot, "x");
    assert_eq!(
        output,
        "@startuml\n\
         note \"Module not installed. Please install it first.\" as x_not_installed\n\
         note \"No models detected in module.\" as x_no_models\n\
         hide empty members\n\
         @enduml"
    );
}

#[test]
fn test_required_integer_attribute() {
    let snapshot = Snapshot::new().with_module(Module::new("a")).with_model(
        Model::new("a.b")
            .with_module("a")
            .with_field(Field::new("x", FieldType::Integer).required()),
    );
    let output = class(&snapshot, "a");
    assert!(output.contains("class \"AB\" as a_a_b <<(M, Darkorange) model>> #Yellow {\n"));
    assert!(output.contains("\t+ x: **Integer** {required}\n"));
}

#[test]
fn test_restrict_many2one_draws_external_class_first() {
    let snapshot = Snapshot::new()
        .with_module(Module::new("base"))
        .with_module(Module::new("sale").with_dependency("base"))
        .with_model(Model::new("res.partner").with_module("base"))
        .with_model(
            Model::new("sale.order").with_module("sale").with_field(
                Field::new("partner_id", FieldType::Many2one)
                    .with_relation("res.partner")
                    .with_on_delete(OnDelete::Restrict),
            ),
        );
    let output = class(&snapshot, "sale");

    let external = "class \"ResPartner\\n//(from **base**)//\" as base_res_partner <<(M, Darkorange) model>> {\n\t}\n";
    let relation = "sale_sale_order \"*\" *-- \"partner_id 1\" base_res_partner : <<restrict>>\n";
    let external_at = output.find(external).unwrap();
    let relation_at = output.find(relation).unwrap();
    assert!(external_at < relation_at);
    assert_eq!(output.matches("as base_res_partner ").count(), 1);
}

#[test]
fn test_mutual_inverse_dependency_terminates() {
    let snapshot = Snapshot::new()
        .with_module(Module::new("a").with_dependency("b"))
        .with_module(Module::new("b").with_dependency("a"));
    let config = DiagramConfig::default();
    let subject = snapshot.module("a").unwrap();
    let mut generator = InversePackageDiagramGenerator::new(&snapshot, subject, &config);
    let output = generator.generate();

    assert_eq!(output.matches("as a <<").count(), 1);
    assert_eq!(output.matches("as b <<").count(), 1);
    assert!(output.contains("a ..> b\n"));
    assert!(output.contains("b ..> a\n"));
}

#[test]
fn test_each_model_rendered_once_across_relations() {
    let snapshot = Snapshot::new()
        .with_module(Module::new("base"))
        .with_module(Module::new("sale").with_dependency("base"))
        .with_model(Model::new("res.partner").with_module("base"))
        .with_model(
            Model::new("sale.order")
                .with_module("sale")
                .with_field(Field::new("partner_id", FieldType::Many2one).with_relation("res.partner"))
                .with_field(
                    Field::new("invoice_partner_id", FieldType::Many2one).with_relation("res.partner"),
                )
                .with_field(Field::new("follower_ids", FieldType::Many2many).with_relation("res.partner")),
        );
    let output = class(&snapshot, "sale");
    assert_eq!(output.matches("as base_res_partner ").count(), 1);
    assert_eq!(output.matches("as sale_sale_order ").count(), 1);
}

#[test]
fn test_bookkeeping_fields_never_rendered() {
    let snapshot = Snapshot::new().with_module(Module::new("a")).with_model(
        Model::new("a.b")
            .with_module("a")
            .with_field(Field::new("__last_update", FieldType::Datetime))
            .with_field(Field::new("display_name", FieldType::Char))
            .with_field(Field::new("name", FieldType::Char)),
    );
    let config = DiagramConfig {
        show_log_attributes: true,
        show_only_own_attrs: false,
        ..DiagramConfig::default()
    };
    let subject = snapshot.module("a").unwrap();
    let mut generator = ClassDiagramGenerator::new(&snapshot, subject, &config);
    let output = generator.generate();
    assert!(!output.contains("__last_update"));
    assert!(!output.contains("display_name"));
    assert!(output.contains("+ name: **Char**"));
}

#[test]
fn test_convenience_functions_are_framed() {
    let snapshot = Snapshot::new()
        .with_module(Module::new("base").with_description("Base", "Core objects", "Acme"))
        .with_module(Module::new("sale").with_dependency("base"))
        .with_model(Model::new("sale.order").with_module("sale"));

    let class = class_diagram(&snapshot, "sale").unwrap();
    assert!(class.contains("title Models Class Diagram\n"));
    assert!(class.contains("//Powered by **modscope** with **PlantUML**//"));

    let package = package_diagram(&snapshot, "sale").unwrap();
    assert!(package.contains("title Module Dependency Diagram\n"));
    assert!(package.contains("sale ..> base\n"));

    let inverse = inverse_package_diagram(&snapshot, "base").unwrap();
    assert!(inverse.contains("title Module Inverse Dependency Diagram\n"));
    assert!(inverse.contains("| **Description**: | Core objects |"));
}

#[test]
fn test_builds_are_deterministic() {
    let snapshot = Snapshot::new()
        .with_module(Module::new("base"))
        .with_module(Module::new("product").with_dependency("base"))
        .with_module(Module::new("sale").with_dependency("product").with_dependency("base"))
        .with_model(Model::new("product.product").with_module("product"))
        .with_model(
            Model::new("sale.line")
                .with_module("sale")
                .with_field(Field::new("product_id", FieldType::Many2one).with_relation("product.product")),
        );
    for kind in DiagramKind::all() {
        let first = modscope::generate(&snapshot, kind, "sale").unwrap();
        let second = modscope::generate(&snapshot, kind, "sale").unwrap();
        assert_eq!(first, second, "{} diagram differs between builds", kind);
    }
}
