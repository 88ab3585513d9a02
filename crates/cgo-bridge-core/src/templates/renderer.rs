//! Handlebars-based renderer for the bridge sources.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled and HTML
//! escaping disabled. Strict mode turns a `{{variable}}` missing from the data context
//! into an error; without it a typo in a template would silently emit an empty symbol
//! name and the failure would only surface at link time.
//!
//! ## Usage
//!
//! ```ignore
//! use cgo_bridge_core::descriptor::BridgeDescriptor;
//! use cgo_bridge_core::templates::{embedded, renderer::TemplateRenderer};
//!
//! let descriptor = BridgeDescriptor::new("foo.h", "foo")?;
//! let renderer = TemplateRenderer::new();
//! let source = renderer.render_bridge(&descriptor, embedded::BRIDGE_C)?;
//! ```

use handlebars::Handlebars;
use serde_json::Value;

use crate::descriptor::BridgeDescriptor;
use crate::error::{BridgeError, Result};
use crate::templates::embedded;
use crate::trampoline::{self, TASK_STATUS_CANCELLED, TASK_STATUS_SUCCESS};

/// Template renderer for the trampoline `.c` file and its companion header.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled and escaping disabled.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| BridgeError::TemplateRender(e.to_string()))
    }

    /// Render a trampoline template and check that the call-through survived.
    pub fn render_bridge(&self, descriptor: &BridgeDescriptor, template: &str) -> Result<String> {
        let source = self.render(template, &bridge_context(descriptor))?;
        trampoline::verify(&source, descriptor)?;
        Ok(source)
    }

    /// Render the companion header for `descriptor`.
    pub fn render_header(&self, descriptor: &BridgeDescriptor) -> Result<String> {
        let mut data = bridge_context(descriptor);
        data["include_guard"] = Value::from(descriptor.include_guard());
        data["status_success"] = Value::from(TASK_STATUS_SUCCESS);
        data["status_cancelled"] = Value::from(TASK_STATUS_CANCELLED);
        self.render(embedded::BRIDGE_HEADER, &data)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn bridge_context(descriptor: &BridgeDescriptor) -> Value {
    serde_json::json!({
        "header_filename": descriptor.header_filename(),
        "module_identifier": descriptor.module_identifier(),
        "symbol": descriptor.symbol_name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo() -> BridgeDescriptor {
        BridgeDescriptor::new("foo.h", "foo").unwrap()
    }

    #[test]
    fn test_render_bridge_foo() {
        let source = TemplateRenderer::new()
            .render_bridge(&foo(), embedded::BRIDGE_C)
            .unwrap();

        assert!(source.starts_with("#include <foo.h>\n"));
        assert!(source.contains(
            "void cgo_rust_task_callback_bridge_foo(RustTaskCallback cb, const void * taskData, int8_t status) {\n  cb(taskData, status);\n}"
        ));
        assert!(source.contains("https://github.com/golang/go/issues/11263"));
    }

    #[test]
    fn test_render_bridge_is_idempotent() {
        let renderer = TemplateRenderer::new();
        let d = BridgeDescriptor::new("arithmeticFFI.h", "arithmetic").unwrap();
        let first = renderer.render_bridge(&d, embedded::BRIDGE_C).unwrap();
        let second = renderer.render_bridge(&d, embedded::BRIDGE_C).unwrap();
        let fresh = TemplateRenderer::new()
            .render_bridge(&d, embedded::BRIDGE_C)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first, fresh);
    }

    #[test]
    fn test_render_symbol_matches_identifier() {
        let renderer = TemplateRenderer::new();
        for m in ["a", "todolist", "Name_Case", "issue45", "_x", "0"] {
            let d = BridgeDescriptor::new("x.h", m).unwrap();
            let source = renderer.render_bridge(&d, embedded::BRIDGE_C).unwrap();
            let expected = format!("void cgo_rust_task_callback_bridge_{m}(");
            assert!(source.contains(&expected), "missing {expected} in:\n{source}");
        }
    }

    #[test]
    fn test_header_path_is_not_escaped() {
        let d = BridgeDescriptor::new("include/a&b's.h", "foo").unwrap();
        let source = TemplateRenderer::new()
            .render_bridge(&d, embedded::BRIDGE_C)
            .unwrap();
        assert!(source.contains("#include <include/a&b's.h>"));
    }

    #[test]
    fn test_strict_mode_missing_variable() {
        let renderer = TemplateRenderer::new();
        let data = serde_json::json!({ "header_filename": "foo.h" });
        let result = renderer.render("void {{symbl}}(void);", &data);
        assert!(matches!(result, Err(BridgeError::TemplateRender(_))));
    }

    #[test]
    fn test_commented_out_body_is_rejected() {
        let template = "#include <{{header_filename}}>\n\
            void {{symbol}}(RustTaskCallback cb, const void * taskData, int8_t status) {\n\
            \x20 // cb(taskData, status);\n\
            }\n";
        let err = TemplateRenderer::new()
            .render_bridge(&foo(), template)
            .unwrap_err();
        assert!(matches!(err, BridgeError::TrampolineBodyMissing { .. }));
    }

    #[test]
    fn test_custom_template_with_extra_content() {
        let template = "/* generated for {{module_identifier}} */\n\
            #include <stdint.h>\n\
            #include <{{header_filename}}>\n\n\
            void {{symbol}}(RustTaskCallback cb, const void *taskData, int8_t status)\n\
            {\n    cb(taskData, status);\n}\n";
        let source = TemplateRenderer::new().render_bridge(&foo(), template).unwrap();
        assert!(source.starts_with("/* generated for foo */"));
    }

    #[test]
    fn test_render_header() {
        let d = BridgeDescriptor::new("fooFFI.h", "foo").unwrap();
        let header = TemplateRenderer::new().render_header(&d).unwrap();

        assert!(header.starts_with("#ifndef FOOFFI_H\n#define FOOFFI_H\n"));
        assert!(header.contains("#include <stdint.h>"));
        assert!(header.contains("#define UNIFFI_RUST_TASK_CALLBACK_SUCCESS 0\n"));
        assert!(header.contains("#define UNIFFI_RUST_TASK_CALLBACK_CANCELLED 1\n"));
        assert!(header.contains("typedef void (*RustTaskCallback)(const void *, int8_t);"));
        assert!(header.contains(
            "void cgo_rust_task_callback_bridge_foo(RustTaskCallback cb, const void * taskData, int8_t status);"
        ));
        assert!(header.trim_end().ends_with("#endif // FOOFFI_H"));
    }
}
