//! Read-only projection of a command model for documentation and help.
//!
//! The engine does no layout here: [`Usage`] only groups, orders and
//! partitions arguments so an external renderer can lay out a help screen.

mod render;

pub use render::{DocRenderer, PlainRenderer};

use serde::Serialize;

use crate::args::OptionKind;
use crate::model::{Argument, CommandModel};

/// Documentation view of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandMetadata {
    pub name: String,
    pub group: Option<String>,
    pub hidden: bool,
    /// Raw description markup.
    pub description: String,
    pub description_text: String,
    pub description_html: String,
    /// Visible arguments in declaration order, engine-reserved ones last.
    pub arguments: Vec<ArgumentMetadata>,
}

/// Documentation view of one argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentMetadata {
    pub name: String,
    pub long_name: String,
    pub short_name: Option<char>,
    pub kind: OptionKind,
    pub type_label: String,
    pub required: bool,
    pub collection: bool,
    pub min_elements: usize,
    /// `None` means unbounded.
    pub max_elements: Option<usize>,
    pub default_values: Vec<String>,
    /// Long names of mutually exclusive arguments.
    pub mutually_exclusive: Vec<String>,
    pub choices: Vec<String>,
    pub sensitive: bool,
    pub special: bool,
    pub group: Option<String>,
    pub doc: String,
    pub doc_text: String,
    pub doc_html: String,
    /// Values bound from the command line, when the model has been parsed.
    pub user_values: Option<Vec<String>>,
}

impl CommandMetadata {
    pub fn from_model(model: &CommandModel, renderer: &dyn DocRenderer) -> Self {
        let arguments = model
            .arguments()
            .iter()
            .filter(|a| !a.is_hidden())
            .map(|a| ArgumentMetadata::from_argument(a, model, renderer))
            .collect();

        Self {
            name: model.name().to_string(),
            group: model.group().map(String::from),
            hidden: model.is_hidden(),
            description: model.description().to_string(),
            description_text: renderer.to_text(model.description()),
            description_html: renderer.to_html(model.description()),
            arguments,
        }
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentMetadata> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

impl ArgumentMetadata {
    fn from_argument(argument: &Argument, model: &CommandModel, renderer: &dyn DocRenderer) -> Self {
        let min_elements = if argument.is_collection() || argument.is_optional() {
            argument.min_elements()
        } else {
            1
        };

        Self {
            name: argument.name().to_string(),
            long_name: argument.long_name().to_string(),
            short_name: argument.short_name(),
            kind: argument.option_kind(),
            type_label: argument.type_label(),
            required: argument.is_required(),
            collection: argument.is_collection(),
            min_elements,
            max_elements: argument.max_elements(),
            default_values: argument.display_values(argument.default_values().unwrap_or_default()),
            mutually_exclusive: argument
                .mutex
                .iter()
                .map(|&i| model.arguments()[i].long_name().to_string())
                .collect(),
            choices: argument.choices.clone(),
            sensitive: argument.is_sensitive(),
            special: argument.is_special(),
            group: argument.group().map(String::from),
            doc: argument.doc().to_string(),
            doc_text: renderer.to_text(argument.doc()),
            doc_html: renderer.to_html(argument.doc()),
            user_values: argument
                .is_set_by_user()
                .then(|| argument.display_values(argument.values())),
        }
    }
}

/// Arguments partitioned for a help screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Usage {
    pub command: String,
    pub description_text: String,
    /// Non-empty sections: required arguments, then optional arguments by
    /// group (ungrouped first, then groups in order of first appearance),
    /// then engine-reserved arguments.
    pub sections: Vec<UsageSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageSection {
    pub title: String,
    pub arguments: Vec<ArgumentMetadata>,
}

pub const REQUIRED_SECTION: &str = "Required Arguments";
pub const OPTIONAL_SECTION: &str = "Optional Arguments";
pub const SPECIAL_SECTION: &str = "Common Arguments";

impl Usage {
    pub fn from_metadata(metadata: &CommandMetadata) -> Self {
        let (special, declared): (Vec<_>, Vec<_>) =
            metadata.arguments.iter().cloned().partition(|a| a.special);
        let (required, optional): (Vec<_>, Vec<_>) = declared.into_iter().partition(|a| a.required);

        let mut sections = vec![UsageSection {
            title: REQUIRED_SECTION.to_string(),
            arguments: required,
        }];

        let mut groups: Vec<UsageSection> = vec![UsageSection {
            title: OPTIONAL_SECTION.to_string(),
            arguments: Vec::new(),
        }];
        for argument in optional {
            let title = argument.group.as_deref().unwrap_or(OPTIONAL_SECTION);
            match groups.iter_mut().find(|s| s.title == title) {
                Some(section) => section.arguments.push(argument),
                None => groups.push(UsageSection {
                    title: title.to_string(),
                    arguments: vec![argument],
                }),
            }
        }
        sections.extend(groups);
        sections.push(UsageSection {
            title: SPECIAL_SECTION.to_string(),
            arguments: special,
        });
        sections.retain(|s| !s.arguments.is_empty());

        Self {
            command: metadata.name.clone(),
            description_text: metadata.description_text.clone(),
            sections,
        }
    }

    pub fn section(&self, title: &str) -> Option<&UsageSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::model::{ArgumentSpec, CommandDescriptor};

    fn model() -> CommandModel {
        CommandModel::build(
            &CommandDescriptor::new("sort")
                .group("Text")
                .description("Sort lines.")
                .arg(ArgumentSpec::path("input").short('i').doc("File to *sort*."))
                .arg(ArgumentSpec::int("limit").default("10").group("Tuning"))
                .arg(ArgumentSpec::flag("reverse").short('r'))
                .arg(ArgumentSpec::text("token").sensitive().default("s3cret"))
                .arg(ArgumentSpec::text("internal").hidden().default("x")),
            &ParserConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_metadata_projection() {
        let metadata = CommandMetadata::from_model(&model(), &PlainRenderer);

        assert_eq!(metadata.name, "sort");
        assert_eq!(metadata.group.as_deref(), Some("Text"));
        assert_eq!(metadata.description_html, "<p>Sort lines.</p>");
        assert!(metadata.argument("internal").is_none());

        let input = metadata.argument("input").unwrap();
        assert_eq!(input.kind, OptionKind::SingleValue);
        assert_eq!(input.type_label, "path");
        assert!(input.required);
        assert_eq!((input.min_elements, input.max_elements), (1, Some(1)));
        assert_eq!(input.doc, "File to *sort*.");
        assert!(input.user_values.is_none());

        let reverse = metadata.argument("reverse").unwrap();
        assert_eq!(reverse.kind, OptionKind::Flag);
        assert_eq!(reverse.default_values, vec!["false"]);

        assert_eq!(metadata.argument("token").unwrap().default_values, vec!["****"]);
        assert!(metadata.argument("help").unwrap().special);
    }

    #[test]
    fn test_metadata_is_idempotent() {
        let model = model();
        assert_eq!(
            CommandMetadata::from_model(&model, &PlainRenderer),
            CommandMetadata::from_model(&model, &PlainRenderer)
        );
    }

    #[test]
    fn test_usage_sections() {
        let usage = Usage::from_metadata(&CommandMetadata::from_model(&model(), &PlainRenderer));
        let titles: Vec<&str> = usage.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![REQUIRED_SECTION, OPTIONAL_SECTION, "Tuning", SPECIAL_SECTION]
        );

        let names = |title: &str| -> Vec<String> {
            usage
                .section(title)
                .unwrap()
                .arguments
                .iter()
                .map(|a| a.name.clone())
                .collect()
        };
        assert_eq!(names(REQUIRED_SECTION), vec!["input"]);
        assert_eq!(names(OPTIONAL_SECTION), vec!["reverse", "token"]);
        assert_eq!(names("Tuning"), vec!["limit"]);
        assert_eq!(names(SPECIAL_SECTION), vec!["help"]);
    }
}
