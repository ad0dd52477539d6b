// ABOUTME: Variable store and token resolution for template expressions
// ABOUTME: Provides the Context mapping and the literal-versus-variable token parser

pub mod literal;
pub mod variables;

pub use literal::parse_literal;
pub use variables::Context;
