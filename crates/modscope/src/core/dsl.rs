//! PlantUML diagram DSL
//!
//! [`PlantUml`] wraps a [`TextBuilder`] and emits syntactically valid PlantUML
//! constructs. It has no notion of modules or models: generators translate
//! metadata into the small spec structs defined here ([`PackageSpec`],
//! [`ClassSpec`], [`AttributeSpec`], [`MethodSpec`], [`Link`]).
//!
//! Every emitter joins its tokens with single spaces in a fixed order and
//! simply leaves out optional tokens that are not set.
//!
//! ```
//! use modscope::core::{PlantUml, PackageSpec};
//!
//! let mut uml = PlantUml::new();
//! uml.begin_uml()
//!     .begin_package(&PackageSpec::new("demo").with_stereotype("Cloud"))
//!     .end_package()
//!     .end_uml();
//! assert_eq!(
//!     uml.output(),
//!     "@startuml\npackage \"demo\" <<Cloud>> {\n\t\n}\nhide empty members\n@enduml"
//! );
//! ```

use std::fmt;

use super::{TextBuilder, Visibility};

/// Icon color used when a class has an icon but no explicit color
pub const DEFAULT_ICON_COLOR: &str = "yellow";

/// Horizontal alignment of header and footer blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Align::Left => write!(f, "left"),
            Align::Right => write!(f, "right"),
            Align::Center => write!(f, "center"),
        }
    }
}

/// Package block definition
#[derive(Debug, Clone, Default)]
pub struct PackageSpec {
    pub name: String,
    pub alias: Option<String>,
    pub stereotype: Option<String>,
    pub color: Option<String>,
}

impl PackageSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_stereotype(mut self, stereotype: impl Into<String>) -> Self {
        self.stereotype = Some(stereotype.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Class block definition
#[derive(Debug, Clone, Default)]
pub struct ClassSpec {
    pub name: String,
    pub alias: Option<String>,
    pub stereotype: Option<String>,
    pub icon: Option<char>,
    pub icon_color: Option<String>,
    /// Background color, used to highlight the subject module's own classes
    pub color: Option<String>,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_stereotype(mut self, stereotype: impl Into<String>) -> Self {
        self.stereotype = Some(stereotype.into());
        self
    }

    pub fn with_icon(mut self, icon: char) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_icon_color(mut self, color: impl Into<String>) -> Self {
        self.icon_color = Some(color.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Default value literal of an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Explicitly absent value, rendered `None`
    None,
    /// String value, rendered single-quoted
    Str(String),
    /// Anything else, rendered verbatim
    Raw(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => write!(f, "None"),
            Literal::Str(s) => write!(f, "'{}'", s),
            Literal::Raw(s) => write!(f, "{}", s),
        }
    }
}

/// Attribute line definition
#[derive(Debug, Clone, Default)]
pub struct AttributeSpec {
    pub visibility: Option<Visibility>,
    pub name: String,
    pub attr_type: Option<String>,
    pub default: Option<Literal>,
    pub is_static: bool,
    pub tags: Vec<String>,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_type(mut self, attr_type: impl Into<String>) -> Self {
        self.attr_type = Some(attr_type.into());
        self
    }

    pub fn with_default(mut self, default: Literal) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// One entry of a method parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Raw(String),
    Typed(String, String),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Raw(s) => write!(f, "{}", s),
            Param::Typed(name, ty) => write!(f, "{}: {}", name, ty),
        }
    }
}

/// Method line definition
#[derive(Debug, Clone, Default)]
pub struct MethodSpec {
    pub visibility: Option<Visibility>,
    pub name: String,
    pub params: Vec<Param>,
    pub ret_type: Option<String>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub tags: Vec<String>,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.params = params;
        self
    }

    pub fn with_return(mut self, ret_type: impl Into<String>) -> Self {
        self.ret_type = Some(ret_type.into());
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Cardinalities and label of a relation line
#[derive(Debug, Clone, Default)]
pub struct Link {
    pub card1: Option<String>,
    pub card2: Option<String>,
    pub name: Option<String>,
    /// Draw an arrow head at the second endpoint
    pub directed: bool,
}

impl Link {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(mut self, card1: impl Into<String>, card2: impl Into<String>) -> Self {
        self.card1 = Some(card1.into());
        self.card2 = Some(card2.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }
}

fn tag_list(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        None
    } else {
        Some(format!("{{{}}}", tags.join(", ")))
    }
}

/// PlantUML document builder
#[derive(Debug, Clone, Default)]
pub struct PlantUml {
    text: TextBuilder,
    title: Option<String>,
    header: Option<String>,
    footer: Option<String>,
}

impl PlantUml {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Open the document: `@startuml`, title and right-aligned header
    pub fn begin_uml(&mut self) -> &mut Self {
        self.text.append("@startuml").newline();
        if let Some(title) = self.title.clone() {
            self.add_title(&title);
            self.text.newline();
        }
        if let Some(header) = self.header.clone() {
            self.add_header(&header, Some(Align::Right));
        }
        self
    }

    /// Close the document: left-aligned footer, `hide empty members`, `@enduml`
    pub fn end_uml(&mut self) -> &mut Self {
        if let Some(footer) = self.footer.clone() {
            self.add_footer(&footer, Some(Align::Left));
        }
        self.text.append("hide empty members").newline();
        self.text.append("@enduml");
        self
    }

    pub fn add_title(&mut self, title: &str) -> &mut Self {
        self.text.append(&format!("title {}", title)).newline();
        self
    }

    pub fn add_header(&mut self, header: &str, align: Option<Align>) -> &mut Self {
        self.add_block("header", header, align)
    }

    pub fn add_footer(&mut self, footer: &str, align: Option<Align>) -> &mut Self {
        self.add_block("footer", footer, align)
    }

    fn add_block(&mut self, keyword: &str, content: &str, align: Option<Align>) -> &mut Self {
        if let Some(align) = align {
            self.text.append(&format!("{} ", align));
        }
        self.text
            .append(keyword)
            .newline()
            .append(content)
            .newline()
            .append(&format!("end{}", keyword))
            .newline();
        self
    }

    pub fn begin_package(&mut self, package: &PackageSpec) -> &mut Self {
        let mut tokens = vec!["package".to_string(), format!("\"{}\"", package.name)];
        if let Some(alias) = &package.alias {
            tokens.push("as".to_string());
            tokens.push(alias.clone());
        }
        if let Some(stereotype) = &package.stereotype {
            tokens.push(format!("<<{}>>", stereotype));
        }
        if let Some(color) = &package.color {
            tokens.push(color.clone());
        }
        tokens.push("{".to_string());
        self.text.append(&tokens.join(" ")).push().newline();
        self
    }

    pub fn end_package(&mut self) -> &mut Self {
        self.text.pop().newline().append("}").newline();
        self
    }

    pub fn begin_class(&mut self, class: &ClassSpec) -> &mut Self {
        let mut tokens = vec!["class".to_string()];
        match &class.alias {
            Some(alias) => tokens.push(format!("\"{}\" as {}", class.name, alias)),
            None => tokens.push(class.name.clone()),
        }

        let icon_color = class.icon_color.as_deref().unwrap_or(DEFAULT_ICON_COLOR);
        match (class.icon, &class.stereotype) {
            (Some(icon), Some(stereotype)) => {
                tokens.push(format!("<<({}, {}) {}>>", icon, icon_color, stereotype))
            }
            (Some(icon), None) => tokens.push(format!("<<({}, {})>>", icon, icon_color)),
            (None, Some(stereotype)) => tokens.push(format!("<<{}>>", stereotype)),
            (None, None) => {}
        }

        if let Some(color) = &class.color {
            tokens.push(color.clone());
        }
        tokens.push("{".to_string());
        self.text.append(&tokens.join(" ")).push().newline();
        self
    }

    pub fn end_class(&mut self) -> &mut Self {
        self.text.pop().append("}").newline();
        self
    }

    /// Separator line inside a class body (`--`, `==`, `..`, `__`)
    pub fn add_section(&mut self, style: &str, title: Option<&str>) -> &mut Self {
        match title {
            Some(title) => self.text.append(&format!("{0} {1} {0}", style, title)),
            None => self.text.append(style),
        };
        self.text.newline();
        self
    }

    /// Attribute line given verbatim
    pub fn add_raw_attribute(&mut self, line: &str) -> &mut Self {
        self.text.append(line).newline();
        self
    }

    pub fn add_attribute(&mut self, attribute: &AttributeSpec) -> &mut Self {
        let mut tokens = Vec::new();
        if attribute.is_static {
            tokens.push("{static}".to_string());
        }
        if let Some(visibility) = attribute.visibility {
            tokens.push(visibility.to_string());
        }
        match &attribute.attr_type {
            Some(attr_type) => tokens.push(format!("{}: {}", attribute.name, attr_type)),
            None => tokens.push(attribute.name.clone()),
        }
        if let Some(default) = &attribute.default {
            tokens.push("=".to_string());
            tokens.push(default.to_string());
        }
        if let Some(tags) = tag_list(&attribute.tags) {
            tokens.push(tags);
        }
        self.text.append(&tokens.join(" ")).newline();
        self
    }

    /// Method line given verbatim
    pub fn add_raw_method(&mut self, line: &str) -> &mut Self {
        self.text.append(line).newline();
        self
    }

    pub fn add_method(&mut self, method: &MethodSpec) -> &mut Self {
        let mut tokens = Vec::new();
        if method.is_static {
            tokens.push("{static}".to_string());
        } else if method.is_abstract {
            tokens.push("{abstract}".to_string());
        }
        if let Some(visibility) = method.visibility {
            tokens.push(visibility.to_string());
        }
        let params: Vec<String> = method.params.iter().map(ToString::to_string).collect();
        let mut signature = format!("{}({})", method.name, params.join(", "));
        if let Some(ret_type) = &method.ret_type {
            signature.push_str(&format!(": {}", ret_type));
        }
        tokens.push(signature);
        if let Some(tags) = tag_list(&method.tags) {
            tokens.push(tags);
        }
        self.text.append(&tokens.join(" ")).newline();
        self
    }

    fn add_relation(&mut self, alias1: &str, operator: &str, alias2: &str, link: &Link) -> &mut Self {
        let mut tokens = vec![alias1.to_string()];
        if let Some(card1) = &link.card1 {
            tokens.push(format!("\"{}\"", card1));
        }
        tokens.push(operator.to_string());
        if let Some(card2) = &link.card2 {
            tokens.push(format!("\"{}\"", card2));
        }
        tokens.push(alias2.to_string());
        if let Some(name) = &link.name {
            tokens.push(format!(": {}", name));
        }
        self.text.append(&tokens.join(" ")).newline();
        self
    }

    pub fn add_association(&mut self, alias1: &str, alias2: &str, link: &Link) -> &mut Self {
        let operator = if link.directed { "-->" } else { "--" };
        self.add_relation(alias1, operator, alias2, link)
    }

    /// Hollow diamond on the first endpoint
    pub fn add_aggregation(&mut self, alias1: &str, alias2: &str, link: &Link) -> &mut Self {
        let operator = if link.directed { "o-->" } else { "o--" };
        self.add_relation(alias1, operator, alias2, link)
    }

    /// Filled diamond on the first endpoint
    pub fn add_composition(&mut self, alias1: &str, alias2: &str, link: &Link) -> &mut Self {
        let operator = if link.directed { "*-->" } else { "*--" };
        self.add_relation(alias1, operator, alias2, link)
    }

    /// `alias1` realizes/extends `alias2`
    pub fn add_implementation(&mut self, alias1: &str, alias2: &str, label: Option<&str>) -> &mut Self {
        let line = match label {
            Some(label) => format!("{} <|.. {} : {}", alias2, alias1, label),
            None => format!("{} <|.. {}", alias2, alias1),
        };
        self.text.append(&line).newline();
        self
    }

    /// `alias1` inherits from `alias2`
    pub fn add_inherit(&mut self, alias1: &str, alias2: &str) -> &mut Self {
        self.text
            .append(&format!("{} <|-- {}", alias2, alias1))
            .newline();
        self
    }

    /// `alias1` delegates to `alias2` through `field`
    pub fn add_delegation(&mut self, alias1: &str, alias2: &str, field: &str) -> &mut Self {
        self.text
            .append(&format!("{} \"{}\" <|--* {}", alias2, field, alias1))
            .newline();
        self
    }

    /// Dotted dependency arrow between packages
    pub fn add_dependency(&mut self, alias1: &str, alias2: &str) -> &mut Self {
        self.text
            .append(&format!("{} ..> {}", alias1, alias2))
            .newline();
        self
    }

    /// Association between two classes plus a dotted link to the join class
    pub fn add_association_class(
        &mut self,
        alias1: &str,
        alias2: &str,
        alias3: &str,
        link: &Link,
    ) -> &mut Self {
        self.add_association(alias1, alias2, link);
        self.text
            .append(&format!("({}, {}) .. {}", alias1, alias2, alias3))
            .newline();
        self
    }

    pub fn add_floating_note(&mut self, note: &str, alias: &str) -> &mut Self {
        self.text
            .append(&format!("note \"{}\" as {}", note, alias))
            .newline();
        self
    }

    pub fn output(&self) -> &str {
        self.text.output()
    }

    pub fn into_output(self) -> String {
        self.text.into_output()
    }
}
