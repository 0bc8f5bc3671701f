//! Model declaration options block

use crate::core::{Model, PlantUml};

use super::naming::type_name;

/// Whether the options block carries a `_name` line for `model`
pub fn emits_name(model: &Model) -> bool {
    model.inherit.first() != Some(&model.name)
}

/// Option lines differing from the framework defaults, in display order
pub fn option_lines(model: &Model) -> Vec<String> {
    let mut lines = Vec::new();
    if emits_name(model) {
        lines.push(format!("_name = '{}'", model.name));
    }
    match model.inherit.as_slice() {
        [] => {}
        [base] => lines.push(format!("_inherit = '{}'", base)),
        bases => {
            let quoted: Vec<String> = bases.iter().map(|b| format!("'{}'", b)).collect();
            lines.push(format!("_inherit = [{}]", quoted.join(", ")));
        }
    }

    let options = &model.options;
    if let Some(table) = &options.table {
        if *table != model.name.replace('.', "_") {
            lines.push(format!("_table = '{}'", table));
        }
    }
    if !options.auto {
        lines.push("_auto = False".to_string());
    }
    if options.date_name != "date" {
        lines.push(format!("_date_name = '{}'", options.date_name));
    }
    if options.fold_name != "fold" {
        lines.push(format!("_fold_name = '{}'", options.fold_name));
    }
    if let Some(rec_name) = &options.rec_name {
        if rec_name != "name" {
            lines.push(format!("_rec_name = '{}'", rec_name));
        }
    }
    if options.order != "id" {
        lines.push(format!("_order = '{}'", options.order));
    }
    if options.parent_name != "parent_id" {
        lines.push(format!("_parent_name = '{}'", options.parent_name));
    }
    if options.parent_store {
        lines.push("_parent_store = True".to_string());
    }
    if let Some(parent_order) = &options.parent_order {
        lines.push(format!("_parent_order = {}", parent_order));
    }
    lines
}

/// Write the options block and its `==` separator
pub fn write_options(uml: &mut PlantUml, model: &Model) {
    let lines = option_lines(model);
    for line in &lines {
        uml.add_raw_attribute(line);
    }
    if !model.inherits.is_empty() {
        uml.add_section("..", Some("//inherits from//"));
        for delegation in &model.inherits {
            uml.add_raw_attribute(&format!(
                "+ {}:{}",
                delegation.field,
                type_name(&delegation.model)
            ));
        }
    }
    if !lines.is_empty() || !model.inherits.is_empty() {
        uml.add_section("==", None);
    }
}
