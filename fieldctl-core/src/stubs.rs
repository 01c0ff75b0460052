//! Behavior and style stubs written next to the schema document

use crate::naming::display_title;

/// What a component was generated from, for the stub headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubOrigin {
    Simple { base: String },
    Composite { children: Vec<String> },
}

/// `<name>.js`: a decorate hook that receives the rendered field
pub fn behavior_stub(name: &str, origin: &StubOrigin) -> String {
    let title = display_title(name);
    let based_on = match origin {
        StubOrigin::Simple { base } => format!("Based on: {base}"),
        StubOrigin::Composite { children } => {
            format!("Composite of: {}", children.join(", "))
        }
    };

    format!(
        r#"/**
 * {title} custom component
 * {based_on}
 *
 * @param {{HTMLElement}} fieldDiv - The DOM element containing the field wrapper
 * @param {{Object}} fieldJson - The form json object for the component
 * @param {{HTMLElement}} parentElement - The parent element of the field
 * @param {{string}} formId - The unique identifier of the form
 */
export default async function decorate(fieldDiv, fieldJson, parentElement, formId) {{
  // TODO: add custom behavior for {name}
  return fieldDiv;
}}
"#
    )
}

/// `<name>.css`: an empty rule scoped to the component's wrapper class
pub fn style_stub(name: &str) -> String {
    format!(
        "/* {title} custom component styles */\n\n.{name} {{\n}}\n",
        title = display_title(name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_stub_simple() {
        let stub = behavior_stub(
            "icon-radio",
            &StubOrigin::Simple {
                base: "Radio Group".to_string(),
            },
        );
        assert!(stub.contains("Icon Radio custom component"));
        assert!(stub.contains("Based on: Radio Group"));
        assert!(stub.contains("export default async function decorate(fieldDiv, fieldJson"));
    }

    #[test]
    fn test_behavior_stub_composite() {
        let stub = behavior_stub(
            "contact-form",
            &StubOrigin::Composite {
                children: vec!["text-input".to_string(), "email".to_string()],
            },
        );
        assert!(stub.contains("Composite of: text-input, email"));
    }

    #[test]
    fn test_style_stub_scoped_to_name() {
        let stub = style_stub("icon-radio");
        assert!(stub.starts_with("/* Icon Radio custom component styles */"));
        assert!(stub.contains(".icon-radio {\n}"));
    }
}
