use super::parser::Node;
use serde_json::Value;

/// Variable lookup: innermost `#each` binding first, then the root data
struct Scope<'a> {
    root: &'a Value,
    bindings: Vec<(&'a str, &'a Value)>,
}

impl<'a> Scope<'a> {
    fn lookup(&self, path: &str) -> Option<&'a Value> {
        let mut segments = path.split('.');
        let head = segments.next()?;

        let mut value = self
            .bindings
            .iter()
            .rev()
            .find(|(name, _)| *name == head)
            .map(|(_, v)| *v)
            .or_else(|| self.root.get(head))?;

        for segment in segments {
            value = match value {
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                other => other.get(segment)?,
            };
        }
        Some(value)
    }
}

pub fn render(nodes: &[Node], data: &Value) -> String {
    let mut scope = Scope {
        root: data,
        bindings: Vec::new(),
    };
    let mut out = String::new();
    render_nodes(nodes, &mut scope, &mut out);
    out
}

fn render_nodes<'a>(nodes: &'a [Node], scope: &mut Scope<'a>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable { path, raw } => match scope.lookup(path) {
                Some(value) => push_value(value, out),
                None => out.push_str(raw),
            },
            Node::Each { list, item, body } => {
                if let Some(Value::Array(items)) = scope.lookup(list) {
                    for element in items {
                        scope.bindings.push((item.as_str(), element));
                        render_nodes(body, scope, out);
                        scope.bindings.pop();
                    }
                }
            }
            Node::If { condition, body } => {
                if scope.lookup(condition).is_some_and(is_truthy) {
                    render_nodes(body, scope, out);
                }
            }
        }
    }
}

fn push_value(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Null => {}
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        compound => out.push_str(&compound.to_string()),
    }
}

/// Missing, null, false, 0 and "" are falsy; arrays and objects are truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
