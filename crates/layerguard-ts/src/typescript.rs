//! TypeScript language extractor using Tree-sitter.

use tree_sitter::{Language, Node, Parser};

use crate::extractor::{
    ClassFact, ExportFact, FileFacts, ImportFact, InterfaceFact, LanguageExtractor, ParseFailure,
    TypeRef,
};

/// Node kinds the extractor reacts to; everything else is only descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyntaxKind {
    Import,
    Class,
    Interface,
    Export,
    Other,
}

impl SyntaxKind {
    fn of(node: &Node<'_>) -> Self {
        match node.kind() {
            "import_statement" => Self::Import,
            "class_declaration" | "abstract_class_declaration" => Self::Class,
            "interface_declaration" => Self::Interface,
            "export_statement" => Self::Export,
            _ => Self::Other,
        }
    }
}

/// Extracts imports, exports, classes, and interfaces from TypeScript source.
pub struct TypeScriptExtractor {
    language: Language,
}

impl TypeScriptExtractor {
    /// Creates a new TypeScript extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        node.utf8_text(src).unwrap_or("")
    }

    fn line(node: &Node<'_>) -> usize {
        node.start_position().row + 1
    }

    /// Walks every node, so declarations nested in functions, namespaces,
    /// and blocks are found too.
    fn visit(node: Node<'_>, src: &[u8], facts: &mut FileFacts) {
        match SyntaxKind::of(&node) {
            SyntaxKind::Import => {
                if let Some(import) = Self::extract_import(&node, src) {
                    facts.imports.push(import);
                }
            }
            SyntaxKind::Class => {
                if let Some(class) = Self::extract_class(&node, src) {
                    facts.classes.push(class);
                }
            }
            SyntaxKind::Interface => {
                if let Some(name) = node.child_by_field_name("name") {
                    facts.interfaces.push(InterfaceFact {
                        name: Self::text(&name, src).to_owned(),
                        line: Self::line(&node),
                    });
                }
            }
            SyntaxKind::Export => Self::extract_exports(&node, src, &mut facts.exports),
            SyntaxKind::Other => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::visit(child, src, facts);
        }
    }

    /// `import ... from "x"`, `import "x"`. The `import x = require("x")`
    /// form keeps its source inside the require clause and is skipped.
    fn extract_import(node: &Node<'_>, src: &[u8]) -> Option<ImportFact> {
        let source = node.child_by_field_name("source")?;
        let raw = Self::text(&source, src);
        Some(ImportFact {
            module_path: raw.trim_matches(&['"', '\'', '`'][..]).to_owned(),
            line: Self::line(node),
        })
    }

    fn extract_class(node: &Node<'_>, src: &[u8]) -> Option<ClassFact> {
        let name = Self::text(&node.child_by_field_name("name")?, src).to_owned();
        let mut extends = Vec::new();
        let mut implements = Vec::new();

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() != "class_heritage" {
                continue;
            }
            let mut heritage_cursor = child.walk();
            for clause in child.named_children(&mut heritage_cursor) {
                let target = match clause.kind() {
                    "extends_clause" => &mut extends,
                    "implements_clause" => &mut implements,
                    _ => continue,
                };
                let mut clause_cursor = clause.walk();
                for ty in clause.named_children(&mut clause_cursor) {
                    if matches!(ty.kind(), "type_arguments" | "comment") {
                        continue;
                    }
                    target.push(TypeRef::new(Self::text(&ty, src)));
                }
            }
        }

        let has_constructor = node
            .child_by_field_name("body")
            .is_some_and(|body| Self::has_constructor(&body, src));

        Some(ClassFact {
            name,
            line: Self::line(node),
            has_constructor,
            extends,
            implements,
        })
    }

    fn has_constructor(body: &Node<'_>, src: &[u8]) -> bool {
        let mut cursor = body.walk();
        let found = body.named_children(&mut cursor).any(|member| {
            member.kind() == "method_definition"
                && member
                    .child_by_field_name("name")
                    .is_some_and(|n| Self::text(&n, src) == "constructor")
        });
        found
    }

    fn extract_exports(node: &Node<'_>, src: &[u8], out: &mut Vec<ExportFact>) {
        let line = Self::line(node);
        let mut push = |name: &str| {
            out.push(ExportFact {
                name: name.to_owned(),
                line,
            });
        };

        if let Some(decl) = node.child_by_field_name("declaration") {
            if let Some(name) = decl.child_by_field_name("name") {
                push(Self::text(&name, src));
                return;
            }
            // `export const a = 1, b = 2;`
            let mut cursor = decl.walk();
            for declarator in decl.named_children(&mut cursor) {
                if declarator.kind() == "variable_declarator" {
                    if let Some(name) = declarator.child_by_field_name("name") {
                        push(Self::text(&name, src));
                    }
                }
            }
            return;
        }

        let mut cursor = node.walk();
        let mut is_default = false;
        for child in node.children(&mut cursor) {
            match child.kind() {
                "default" => is_default = true,
                "export_clause" => {
                    let mut clause_cursor = child.walk();
                    for spec in child.named_children(&mut clause_cursor) {
                        if spec.kind() != "export_specifier" {
                            continue;
                        }
                        let visible = spec
                            .child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"));
                        if let Some(visible) = visible {
                            push(Self::text(&visible, src));
                        }
                    }
                }
                _ => {}
            }
        }
        if is_default {
            push("default");
        }
    }

    /// Returns the first error or missing node below `node`.
    fn first_error(node: Node<'_>) -> Node<'_> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.is_error() || child.is_missing() {
                return child;
            }
            if child.has_error() {
                return Self::first_error(child);
            }
        }
        node
    }
}

impl Default for TypeScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for TypeScriptExtractor {
    fn language_id(&self) -> &'static str {
        "typescript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".ts"]
    }

    fn analyze(&self, source: &str) -> Result<FileFacts, ParseFailure> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseFailure::new(format!("cannot load TypeScript grammar: {e}")))?;

        let src = source.as_bytes();
        let tree = parser
            .parse(src, None)
            .ok_or_else(|| ParseFailure::new("parser produced no syntax tree"))?;
        let root = tree.root_node();

        if root.has_error() {
            let bad = Self::first_error(root);
            let line = Self::line(&bad);
            let what = if bad.is_missing() {
                format!("missing `{}`", bad.kind())
            } else {
                "unexpected syntax".to_owned()
            };
            return Err(ParseFailure::at_line(
                format!("syntax error at line {line}: {what}"),
                line,
            ));
        }

        let mut facts = FileFacts::default();
        Self::visit(root, src, &mut facts);
        Ok(facts)
    }
}
