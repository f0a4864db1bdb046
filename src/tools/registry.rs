//! Tool registry: name lookup, declarations and call dispatch.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, warn};

use super::Tool;
use crate::error::ToolError;
use crate::types::tool::{FunctionCall, FunctionDeclaration, FunctionResponse};

/// Registered tools, keyed by name, plus their declarations in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    declarations: Vec<FunctionDeclaration>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A tool with the same name is replaced, keeping its
    /// slot in the declaration list.
    pub fn add<T: Tool + 'static>(&mut self, tool: T) {
        self.add_shared(Arc::new(tool));
    }

    pub fn add_shared(&mut self, tool: Arc<dyn Tool>) {
        let declaration = tool.declaration().clone();
        let name = declaration.name.clone();

        match self.declarations.iter_mut().find(|d| d.name == name) {
            Some(existing) => {
                debug!(tool = %name, "replacing registered tool");
                *existing = declaration;
            }
            None => self.declarations.push(declaration),
        }
        self.tools.insert(name, tool);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(AsRef::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.declarations.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn declarations(&self) -> &[FunctionDeclaration] {
        &self.declarations
    }

    /// Invoke a tool by name. A panicking tool body is reported as
    /// [`ToolError::Execution`].
    pub fn call(&self, call: &FunctionCall) -> Result<serde_json::Value, ToolError> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| ToolError::NotFound(call.name.clone()))?;
        panic::catch_unwind(AssertUnwindSafe(|| tool.call(&call.args))).unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            warn!(tool = %call.name, panic = %message, "tool panicked");
            Err(ToolError::Execution(message))
        })
    }

    /// Invoke the tool requested by `call` and wrap the outcome as a function
    /// response. Failures (unknown tool, bad arguments, tool errors, panics) become
    /// `{"error": ...}` payloads so the conversation can continue.
    pub fn dispatch(&self, call: &FunctionCall) -> FunctionResponse {
        match self.call(call) {
            Ok(result) => {
                debug!(tool = %call.name, id = ?call.id, "tool call succeeded");
                FunctionResponse::result(call, result)
            }
            Err(e @ ToolError::NotFound(_)) => {
                warn!(tool = %call.name, "model requested an unregistered tool");
                FunctionResponse::error(call, e.to_string())
            }
            Err(e) => {
                debug!(tool = %call.name, error = %e, "tool call failed");
                FunctionResponse::error(call, e.to_string())
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::FunctionTool;
    use serde::Deserialize;
    use serde_json::{json, Map};

    #[derive(Deserialize)]
    struct DivideArgs {
        a: f64,
        b: f64,
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.add(
            FunctionTool::builder("divide")
                .param::<f64>("a")
                .param::<f64>("b")
                .handler(|args: DivideArgs| {
                    if args.b == 0.0 {
                        return Err(ToolError::execution("division by zero"));
                    }
                    Ok(args.a / args.b)
                }),
        );
        registry
    }

    fn call(name: &str, args: serde_json::Value) -> FunctionCall {
        let args = match args {
            serde_json::Value::Object(m) => m,
            _ => Map::new(),
        };
        FunctionCall::new(name, args).with_id("call-1")
    }

    #[test]
    fn test_dispatch_success() {
        let resp = registry().dispatch(&call("divide", json!({"a": 9, "b": 3})));
        assert_eq!(resp.id.as_deref(), Some("call-1"));
        assert_eq!(resp.name, "divide");
        assert_eq!(resp.response, json!({"result": 3.0}));
    }

    #[test]
    fn test_unregistered_tool_yields_error_payload() {
        let resp = registry().dispatch(&call("book_taxi", json!({})));
        assert!(resp.is_error());
        let msg = resp.error_message().unwrap();
        assert!(msg.contains("book_taxi"));
        assert_eq!(msg, "Function book_taxi not implemented by agent");
    }

    #[test]
    fn test_tool_failure_yields_error_payload() {
        let resp = registry().dispatch(&call("divide", json!({"a": 1, "b": 0})));
        assert_eq!(resp.error_message(), Some("division by zero"));
    }

    #[test]
    fn test_panicking_tool_yields_error_payload() {
        let mut registry = registry();
        registry.add(FunctionTool::builder("lookup").raw_handler(|_| {
            let seats = vec![1, 2, 3];
            let index = seats.len() + 6;
            Ok(json!(seats[index]))
        }));
        registry.add(
            FunctionTool::builder("explode")
                .raw_handler(|_| panic!("booking backend unavailable: {}", 503)),
        );

        let resp = registry.dispatch(&call("lookup", json!({})));
        assert!(resp
            .error_message()
            .unwrap()
            .contains("index out of bounds"));

        let resp = registry.dispatch(&call("explode", json!({})));
        assert_eq!(resp.error_message(), Some("booking backend unavailable: 503"));

        let resp = registry.dispatch(&call("divide", json!({"a": 8, "b": 2})));
        assert_eq!(resp.response, json!({"result": 4.0}));
    }

    #[test]
    fn test_static_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "tool panicked");
    }

    #[test]
    fn test_bad_arguments_yield_error_payload() {
        let resp = registry().dispatch(&call("divide", json!({"a": "one", "b": 2})));
        assert!(resp.error_message().unwrap().starts_with("invalid arguments"));
    }

    #[test]
    fn test_replacing_tool_keeps_single_declaration() {
        let mut registry = registry();
        registry.add(
            FunctionTool::builder("divide")
                .description("Always one.")
                .raw_handler(|_| Ok(json!(1))),
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.declarations().len(), 1);
        assert_eq!(registry.declarations()[0].description, "Always one.");
        let resp = registry.dispatch(&call("divide", json!({})));
        assert_eq!(resp.response["result"], 1);
    }

    #[test]
    fn test_names_in_registration_order() {
        let mut registry = registry();
        registry.add(FunctionTool::builder("alpha").raw_handler(|_| Ok(json!(null))));
        assert_eq!(registry.names(), vec!["divide", "alpha"]);
        assert!(registry.contains("alpha"));
        assert!(!registry.is_empty());
    }
}
