//! Template directives: `{% include "file.sql" %}`.

use crate::parser::Parser;
use crate::SyntaxKind::*;

/// `{% include [: type] "path" %}`
pub(crate) fn directive(p: &mut Parser<'_>) {
    p.start_node(DIRECTIVE_STMT);
    p.bump();
    p.expect(INCLUDE_KW);
    if p.eat(COLON) {
        p.expect(TYPE_KW);
    }
    if p.at(STRING) {
        p.bump_string();
    } else {
        p.error_expected("file name");
    }
    p.expect(DIRECTIVE_CLOSE);
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use crate::{parse, SyntaxKind::*};

    #[test]
    fn test_include() {
        let parse = parse("{% include \"a.sql\" %}");
        assert!(parse.errors.is_empty(), "{:?}", parse.errors);
        let directive = parse.syntax().first_child().expect("directive");
        assert_eq!(directive.kind(), DIRECTIVE_STMT);
        let strings: Vec<_> = directive.children().collect();
        assert_eq!(strings.len(), 1);
        assert_eq!(strings[0].kind(), STRING_LITERAL);
        assert_eq!(strings[0].to_string(), "\"a.sql\"");
    }

    #[test]
    fn test_typed_include() {
        let parse = parse("{% include:type 'types.sql' %}");
        assert!(parse.errors.is_empty(), "{:?}", parse.errors);
    }

    #[test]
    fn test_include_outside_directive_is_identifier() {
        let parse = parse("BEGIN include := 1; END;");
        assert!(parse.errors.is_empty(), "{:?}", parse.errors);
    }

    #[test]
    fn test_unterminated_directive() {
        let parse = parse("{% include \"a.sql\"");
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].message, "unexpected end of file, expected '%}'");
    }
}
