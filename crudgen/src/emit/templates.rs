//! File and method skeletons
//!
//! Sections are assembled in Rust and substituted here as plain strings, so the
//! templates contain no block helpers and whitespace is exactly what is written.

/// First line of every generated file
pub const HEADER: &str =
    "// This file is generated by crudgen. Do not edit: it is overwritten on every run.";

/// Registered name of [`FILE_TEMPLATE`]
pub const FILE_TEMPLATE_NAME: &str = "file";

/// A whole generated file
pub const FILE_TEMPLATE: &str = "{{header}}
{{imports}}

{{decorators}}export class {{class_name}} {
{{members}}
}
";

/// Registered name of [`METHOD_TEMPLATE`]
pub const METHOD_TEMPLATE_NAME: &str = "method";

/// One class method; `decorators` is empty or ends with a newline
pub const METHOD_TEMPLATE: &str = "{{decorators}}  async {{name}}({{parameter}}): Promise<{{return_type}}> {
{{body}}
  }";
