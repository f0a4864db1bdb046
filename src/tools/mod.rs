//! 工具模块：工具声明、参数类型解析与调用分发。
//!
//! # Tools Module
//!
//! Local callables exposed to the model through function calling.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`Tool`] | A declaration plus a synchronous body |
//! | [`FunctionTool`] | Closure-backed tool built with [`FunctionToolBuilder`] |
//! | [`SchemaType`] | Rust type to schema type mapping |
//! | [`ToolRegistry`] | Name lookup and dispatch into function responses |

pub mod function;
pub mod registry;
pub mod schema;

pub use function::{FunctionTool, FunctionToolBuilder};
pub use registry::ToolRegistry;
pub use schema::SchemaType;

use serde_json::{Map, Value};

use crate::error::ToolError;
use crate::types::tool::FunctionDeclaration;

/// A callable the model can invoke.
///
/// Bodies run inline on the session task, one call at a time.
pub trait Tool: Send + Sync {
    fn declaration(&self) -> &FunctionDeclaration;

    fn name(&self) -> &str {
        &self.declaration().name
    }

    fn call(&self, args: &Map<String, Value>) -> Result<Value, ToolError>;
}
