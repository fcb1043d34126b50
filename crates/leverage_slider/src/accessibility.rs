//! Accessibility tree output
//!
//! The slider exposes one `Role::Slider` node carrying its range, current
//! value and value text, plus one independently activatable button per
//! integer label.

use accesskit::{Action, Node, Role};

/// Inputs for the slider's own node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSemantics<'a> {
    pub min: i32,
    pub max: i32,
    pub value: i32,
    pub value_text: &'a str,
    pub label: Option<&'a str>,
    pub disabled: bool,
}

/// Build the `Role::Slider` node
pub fn slider_node(semantics: SliderSemantics<'_>) -> Node {
    let mut node = Node::new(Role::Slider);
    node.set_min_numeric_value(f64::from(semantics.min));
    node.set_max_numeric_value(f64::from(semantics.max));
    node.set_numeric_value(f64::from(semantics.value));
    node.set_numeric_value_step(1.0);
    node.set_value(semantics.value_text);

    if let Some(label) = semantics.label {
        node.set_label(label);
    }

    if semantics.disabled {
        node.set_disabled();
    } else {
        if semantics.value < semantics.max {
            node.add_action(Action::Increment);
        }
        if semantics.value > semantics.min {
            node.add_action(Action::Decrement);
        }
    }

    node
}

/// Build the button node for one integer label
pub fn label_node(text: &str, selected: bool, disabled: bool) -> Node {
    let mut node = Node::new(Role::Button);
    node.set_label(text);
    if selected {
        node.set_selected(true);
    }
    if disabled {
        node.set_disabled();
    } else {
        node.add_action(Action::Click);
    }
    node
}
