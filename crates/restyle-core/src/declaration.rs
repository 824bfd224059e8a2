//! Shallow declaration structure parsed from a token snapshot.
//!
//! The parser only looks at leading keywords and scope shape. Type and
//! extension bodies are parsed into children; function bodies and other
//! scopes are treated as opaque.
//!
//! A [`Declaration`] describes one generation of a stream. Rules re-parse
//! after each mutation instead of keeping declarations around.

use std::fmt;
use std::ops::Range;

use crate::navigation::{end_of_line, end_of_scope, end_of_statement, index_of, Significance};
use crate::token::{source_text, Token};

/// Flavour of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `class`
    Class,
    /// `struct`
    Struct,
    /// `enum`
    Enum,
    /// `actor`
    Actor,
    /// `protocol`
    Protocol,
}

/// What a declaration declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// A nominal type; has children.
    Type(TypeKind),
    /// An extension; has children.
    Extension,
    /// `func`, `init`, `deinit` or `subscript`.
    Function,
    /// `var` or `let`.
    Property,
    /// `typealias` or `associatedtype`.
    TypeAlias,
    /// `import`.
    Import,
    /// `case` inside an enum.
    EnumCase,
    /// An `#if` block; its contents are children.
    Conditional,
    /// Anything else.
    Statement,
}

impl DeclarationKind {
    /// Whether declarations of this kind contain child declarations.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Type(_) | Self::Extension | Self::Conditional)
    }
}

/// Access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Visibility {
    /// `private`
    Private,
    /// `fileprivate`
    Fileprivate,
    /// `internal`
    Internal,
    /// `package`
    Package,
    /// `public`
    Public,
    /// `open`
    Open,
}

impl Visibility {
    /// Parses a visibility keyword.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "private" => Self::Private,
            "fileprivate" => Self::Fileprivate,
            "internal" => Self::Internal,
            "package" => Self::Package,
            "public" => Self::Public,
            "open" => Self::Open,
            _ => return None,
        })
    }

    /// The keyword for this access level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Fileprivate => "fileprivate",
            Self::Internal => "internal",
            Self::Package => "package",
            Self::Public => "public",
            Self::Open => "open",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A modifier or attribute in front of a declaration keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    /// Normalised text, e.g. `public`, `private(set)`, `@objc`.
    pub name: String,
    /// Tokens the modifier spans.
    pub range: Range<usize>,
}

impl Modifier {
    /// Whether this is an `@attribute`.
    #[must_use]
    pub fn is_attribute(&self) -> bool {
        self.name.starts_with('@')
    }
}

/// One node of the declaration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// What is declared.
    pub kind: DeclarationKind,
    /// Index of the introducing keyword (first token for statements).
    pub keyword_index: usize,
    /// Text of the introducing keyword.
    pub keyword: String,
    /// Declared name, when there is a simple one.
    pub name: Option<String>,
    /// Explicit access level.
    pub visibility: Option<Visibility>,
    /// Modifiers and attributes in source order.
    pub modifiers: Vec<Modifier>,
    /// Tokens covered, including leading comments and blank lines and the
    /// linebreak ending the last line.
    pub range: Range<usize>,
    /// Tokens between the braces of a type or extension body.
    pub body: Option<Range<usize>>,
    /// Nested declarations of containers.
    pub children: Vec<Declaration>,
    pub(crate) generation: u64,
}

impl Declaration {
    /// Generation of the stream this was parsed from.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the first significant token (first modifier or keyword).
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.modifiers
            .first()
            .map_or(self.keyword_index, |m| m.range.start)
    }

    /// The modifier named `name`, if present.
    #[must_use]
    pub fn modifier(&self, name: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.name == name)
    }

    /// This declaration and all descendants, depth first.
    pub fn walk(&self) -> impl Iterator<Item = &Declaration> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }
}

/// Parses the top-level declarations of `tokens`.
#[must_use]
pub fn parse_declarations(tokens: &[Token], generation: u64) -> Vec<Declaration> {
    Parser { tokens, generation }.parse_range(0..tokens.len(), false)
}

/// Flattens a declaration forest depth first.
pub fn walk(declarations: &[Declaration]) -> impl Iterator<Item = &Declaration> + '_ {
    declarations.iter().flat_map(Declaration::walk)
}

const MODIFIER_WORDS: &[&str] = &[
    "private",
    "fileprivate",
    "internal",
    "public",
    "static",
    "open",
    "package",
    "final",
    "override",
    "mutating",
    "nonmutating",
    "lazy",
    "weak",
    "unowned",
    "dynamic",
    "optional",
    "required",
    "convenience",
    "indirect",
    "nonisolated",
    "prefix",
    "postfix",
    "infix",
];

struct Parser<'a> {
    tokens: &'a [Token],
    generation: u64,
}

impl Parser<'_> {
    fn parse_range(&self, range: Range<usize>, in_enum: bool) -> Vec<Declaration> {
        let mut declarations: Vec<Declaration> = Vec::new();
        let mut start = range.start;
        while start < range.end {
            let Some(first) = self.first_significant(start, range.end) else {
                if let Some(last) = declarations.last_mut() {
                    last.range.end = range.end;
                }
                break;
            };
            let mut declaration = self.parse_one(first, range.end, in_enum);
            declaration.range.start = start;
            start = declaration.range.end;
            declarations.push(declaration);
        }
        declarations
    }

    fn first_significant(&self, from: usize, end: usize) -> Option<usize> {
        (from..end).find(|&i| !self.tokens[i].is_space_or_comment_or_linebreak())
    }

    fn next_significant(&self, after: usize) -> Option<usize> {
        index_of(self.tokens, Significance::NonSpaceOrCommentOrLinebreak, after)
    }

    fn parse_one(&self, first: usize, end: usize, in_enum: bool) -> Declaration {
        let (modifiers, keyword_index) = self.modifiers(first, end);
        let kind = self.classify(keyword_index, in_enum);
        let (keyword_index, modifiers) = if kind == DeclarationKind::Statement {
            (first, Vec::new())
        } else {
            (keyword_index, modifiers)
        };
        let keyword = self.tokens[keyword_index].text().to_string();

        let last = if kind == DeclarationKind::Conditional {
            end_of_scope(self.tokens, keyword_index).unwrap_or(end - 1)
        } else {
            end_of_statement(self.tokens, keyword_index).min(end - 1)
        };

        let mut body = None;
        let mut children = Vec::new();
        match kind {
            DeclarationKind::Type(_) | DeclarationKind::Extension => {
                if let Some(open) = (keyword_index..=last).find(|&i| self.tokens[i].is_start("{")) {
                    if let Some(close) = end_of_scope(self.tokens, open) {
                        body = Some(open + 1..close);
                        let is_enum = kind == DeclarationKind::Type(TypeKind::Enum);
                        children = self.parse_range(open + 1..close, is_enum);
                    }
                }
            }
            DeclarationKind::Conditional => {
                if last > keyword_index {
                    let inner = end_of_line(self.tokens, keyword_index);
                    let inner_start = (inner + 1).min(last);
                    body = Some(inner_start..last);
                    children = self.parse_range(inner_start..last, in_enum);
                }
            }
            _ => {}
        }

        let visibility = modifiers
            .iter()
            .find_map(|m: &Modifier| Visibility::from_keyword(&m.name));

        Declaration {
            kind,
            keyword_index,
            keyword,
            name: self.name(kind, keyword_index, last),
            visibility,
            modifiers,
            range: first..self.end_of_trailing_line(last, end),
            body,
            children,
            generation: self.generation,
        }
    }

    /// Collects modifiers starting at `first`; returns them with the index
    /// of the token following them.
    fn modifiers(&self, first: usize, end: usize) -> (Vec<Modifier>, usize) {
        let mut modifiers = Vec::new();
        let mut i = first;
        while i < end {
            let token = &self.tokens[i];
            let word = token.text();
            let is_modifier = token.is_attribute()
                || (matches!(token, Token::Keyword(_) | Token::Identifier(_))
                    && MODIFIER_WORDS.contains(&word)
                    && self.next_significant(i).is_some_and(|n| {
                        matches!(self.tokens[n], Token::Keyword(_) | Token::Identifier(_))
                            || self.tokens[n].is_start("(")
                    }))
                || (token.is_keyword("class")
                    && self.next_significant(i).is_some_and(|n| {
                        ["func", "var", "let", "subscript"]
                            .iter()
                            .any(|k| self.tokens[n].is_keyword(k))
                            || MODIFIER_WORDS.contains(&self.tokens[n].text())
                    }));
            if !is_modifier {
                break;
            }
            let mut name = word.to_string();
            let mut last = i;
            if self.tokens.get(i + 1).is_some_and(|t| t.is_start("(")) {
                match end_of_scope(self.tokens, i + 1) {
                    Some(close) if token.is_attribute() || close == i + 3 => {
                        name = source_text(&self.tokens[i..=close]);
                        last = close;
                    }
                    // `open(file)` and friends are calls, not modifiers.
                    _ if !token.is_attribute() => break,
                    _ => {}
                }
            }
            modifiers.push(Modifier {
                name,
                range: i..last + 1,
            });
            match self.next_significant(last) {
                Some(next) if next < end => i = next,
                _ => return (modifiers, last),
            }
        }
        (modifiers, i.min(end.saturating_sub(1)))
    }

    fn classify(&self, index: usize, in_enum: bool) -> DeclarationKind {
        let token = &self.tokens[index];
        match token {
            Token::StartOfScope(s) if s == "#if" => DeclarationKind::Conditional,
            Token::Keyword(k) => match k.as_str() {
                "class" => DeclarationKind::Type(TypeKind::Class),
                "struct" => DeclarationKind::Type(TypeKind::Struct),
                "enum" => DeclarationKind::Type(TypeKind::Enum),
                "protocol" => DeclarationKind::Type(TypeKind::Protocol),
                "extension" => DeclarationKind::Extension,
                "func" | "init" | "deinit" | "subscript" => DeclarationKind::Function,
                "var" | "let" => DeclarationKind::Property,
                "typealias" | "associatedtype" => DeclarationKind::TypeAlias,
                "import" => DeclarationKind::Import,
                "case" if in_enum => DeclarationKind::EnumCase,
                _ => DeclarationKind::Statement,
            },
            Token::Identifier(name)
                if name == "actor"
                    && self
                        .next_significant(index)
                        .is_some_and(|n| matches!(self.tokens[n], Token::Identifier(_))) =>
            {
                DeclarationKind::Type(TypeKind::Actor)
            }
            _ => DeclarationKind::Statement,
        }
    }

    fn name(&self, kind: DeclarationKind, keyword_index: usize, last: usize) -> Option<String> {
        let next = self.next_significant(keyword_index).filter(|&n| n <= last);
        match kind {
            DeclarationKind::Statement | DeclarationKind::Conditional => None,
            DeclarationKind::Function => match self.tokens[keyword_index].text() {
                "init" | "deinit" | "subscript" => Some(self.tokens[keyword_index].text().to_string()),
                _ => next.map(|n| self.tokens[n].text().to_string()),
            },
            DeclarationKind::Extension | DeclarationKind::Import => {
                let mut i = next?;
                let import_kind = matches!(
                    self.tokens[i].text(),
                    "struct" | "class" | "enum" | "protocol" | "func" | "var" | "let" | "typealias"
                );
                if kind == DeclarationKind::Import && import_kind {
                    i = self.next_significant(i)?;
                }
                let mut path = String::new();
                while i <= last {
                    match &self.tokens[i] {
                        Token::Identifier(s) | Token::Keyword(s) => path.push_str(s),
                        Token::Operator(s, _) if s == "." => path.push('.'),
                        _ => break,
                    }
                    i += 1;
                }
                (!path.is_empty()).then_some(path)
            }
            _ => next
                .filter(|&n| matches!(self.tokens[n], Token::Identifier(_)))
                .map(|n| self.tokens[n].text().to_string()),
        }
    }

    /// Index just past the line holding `last`: the trailing comment and
    /// linebreak belong to the declaration, unless another statement
    /// follows on the same line.
    fn end_of_trailing_line(&self, last: usize, end: usize) -> usize {
        let mut i = last + 1;
        while i < end {
            match &self.tokens[i] {
                Token::Linebreak(..) => return i + 1,
                Token::Delimiter(d) if d == ";" => {}
                Token::StartOfScope(s) if s == "//" => {}
                Token::StartOfScope(s) if s == "/*" => {
                    i = end_of_scope(self.tokens, i).unwrap_or(end - 1);
                }
                token if token.is_space_or_comment() => {}
                _ => return i,
            }
            i += 1;
        }
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, LexOptions};

    fn parse(source: &str) -> (Vec<Token>, Vec<Declaration>) {
        let tokens = tokenize(source, LexOptions::default()).unwrap();
        let declarations = parse_declarations(&tokens, 0);
        (tokens, declarations)
    }

    #[test]
    fn classifies_top_level_declarations() {
        let (_, decls) = parse(
            "import Foundation\n\npublic struct Foo {}\nfunc bar() {}\nlet x = 1\nprint(x)\n",
        );
        let kinds: Vec<_> = decls.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DeclarationKind::Import,
                DeclarationKind::Type(TypeKind::Struct),
                DeclarationKind::Function,
                DeclarationKind::Property,
                DeclarationKind::Statement,
            ]
        );
        assert_eq!(decls[0].name.as_deref(), Some("Foundation"));
        assert_eq!(decls[1].name.as_deref(), Some("Foo"));
        assert_eq!(decls[1].visibility, Some(Visibility::Public));
        assert_eq!(decls[2].name.as_deref(), Some("bar"));
        assert_eq!(decls[3].name.as_deref(), Some("x"));
    }

    #[test]
    fn sibling_ranges_are_contiguous_and_cover_the_file() {
        let source = "// header\nimport A\n\n/// Doc\nclass B {\n    var c = 1\n}\n\n";
        let (tokens, decls) = parse(source);
        assert_eq!(decls.first().unwrap().range.start, 0);
        assert_eq!(decls.last().unwrap().range.end, tokens.len());
        for pair in decls.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
        let text = source_text(&tokens[decls[1].range.clone()]);
        assert!(text.starts_with("\n/// Doc\nclass B"), "{text:?}");
    }

    #[test]
    fn parses_children_of_types_and_extensions() {
        let (_, decls) = parse(
            "extension Foo.Bar {\n    private(set) var a = 1\n    static func b() {}\n}\n\
             enum E {\n    case a, b\n    case c\n}\n",
        );
        assert_eq!(decls[0].name.as_deref(), Some("Foo.Bar"));
        let children: Vec<_> = decls[0].children.iter().map(|d| d.kind).collect();
        assert_eq!(
            children,
            vec![DeclarationKind::Property, DeclarationKind::Function]
        );
        let a = &decls[0].children[0];
        assert_eq!(a.modifiers[0].name, "private(set)");
        assert_eq!(a.visibility, None);
        assert_eq!(decls[0].children[1].modifiers[0].name, "static");

        let cases: Vec<_> = decls[1].children.iter().map(|d| d.kind).collect();
        assert_eq!(cases, vec![DeclarationKind::EnumCase; 2]);
    }

    #[test]
    fn attributes_and_modifiers_precede_keyword() {
        let (tokens, decls) = parse("@objc\nprivate final class func foo() {}\n");
        let decl = &decls[0];
        assert_eq!(decl.kind, DeclarationKind::Function);
        let names: Vec<_> = decl.modifiers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["@objc", "private", "final", "class"]);
        assert!(tokens[decl.keyword_index].is_keyword("func"));
        assert_eq!(decl.visibility, Some(Visibility::Private));
    }

    #[test]
    fn conditional_blocks_hold_children() {
        let (_, decls) = parse("#if DEBUG\nlet a = 1\n#else\nlet a = 2\n#endif\nlet b = 3\n");
        assert_eq!(decls[0].kind, DeclarationKind::Conditional);
        assert_eq!(decls[0].children.len(), 3);
        assert_eq!(decls[1].name.as_deref(), Some("b"));
    }

    #[test]
    fn actor_and_next_line_braces() {
        let (_, decls) = parse("actor Counter\n{\n    var n = 0\n}\nfoo()\n");
        assert_eq!(decls[0].kind, DeclarationKind::Type(TypeKind::Actor));
        assert_eq!(decls[0].children.len(), 1);
        assert_eq!(decls[1].kind, DeclarationKind::Statement);
    }

    #[test]
    fn walk_visits_descendants_in_order() {
        let (_, decls) = parse("struct A {\n    struct B {\n        let c = 1\n    }\n}\n");
        let names: Vec<_> = walk(&decls).filter_map(|d| d.name.clone()).collect();
        assert_eq!(names, ["A", "B", "c"]);
    }
}
