//! Grammar rules.
//!
//! Every place where several constructs may start is an ordered table of
//! [`Rule`]s: the first rule whose lookahead matches is parsed, later rules
//! are never tried. The tables are plain data (`TOP_LEVEL`, `STATEMENTS`,
//! `DECLARATIONS`, ...) and [`production`] is the single interpreter for
//! them, which is also where progress, nesting, budget and error-node
//! policies are enforced.

mod declarations;
mod directives;
mod dml;
mod expressions;
mod items;
mod select;
mod statements;

use crate::parser::Parser;
use crate::SyntaxKind::{self, *};

pub(crate) type ParseFn = for<'a, 'b> fn(&'b mut Parser<'a>);
pub(crate) type TestFn = for<'a, 'b> fn(&'b Parser<'a>) -> bool;

/// How a rule recognises that it applies.
#[derive(Clone, Copy)]
pub(crate) enum Lookahead {
    Kind(SyntaxKind),
    AnyOf(&'static [SyntaxKind]),
    /// An exact sequence of upcoming non-trivia tokens
    Seq(&'static [SyntaxKind]),
    Test(TestFn),
}

impl Lookahead {
    fn matches(self, p: &Parser<'_>) -> bool {
        match self {
            Lookahead::Kind(kind) => p.at(kind),
            Lookahead::AnyOf(kinds) => p.at_any(kinds),
            Lookahead::Seq(kinds) => kinds
                .iter()
                .enumerate()
                .all(|(n, kind)| p.nth_at(n, *kind)),
            Lookahead::Test(test) => test(p),
        }
    }
}

pub(crate) struct Rule {
    pub(crate) name: &'static str,
    pub(crate) lookahead: Lookahead,
    pub(crate) parse: ParseFn,
}

impl Rule {
    pub(crate) const fn new(name: &'static str, lookahead: Lookahead, parse: ParseFn) -> Self {
        Self {
            name,
            lookahead,
            parse,
        }
    }
}

/// Ordered choice: parse the first rule whose lookahead matches.
pub(crate) fn choose(p: &mut Parser<'_>, rules: &[Rule]) -> bool {
    match rules.iter().find(|rule| rule.lookahead.matches(p)) {
        Some(rule) => {
            tracing::trace!(rule = rule.name, "production");
            (rule.parse)(p);
            true
        }
        None => false,
    }
}

/// One statement-level production chosen from `rules`.
///
/// If nothing matches, or the chosen rule consumed nothing, the error is
/// reported and the parser skips to the next statement boundary.
pub(crate) fn production(p: &mut Parser<'_>, rules: &[Rule], context: &str) {
    let start = p.position();
    let errors_before = p.error_count();
    let checkpoint = p.checkpoint();

    if !p.enter() {
        p.recover();
        return;
    }
    let matched = choose(p, rules);
    p.exit();

    if p.is_cancelled() {
        return;
    }
    if !matched {
        p.error_no_alternative(context);
        p.recover();
        return;
    }
    if p.position() == start {
        p.error_no_alternative(context);
        p.recover();
        return;
    }
    if p.marks_error_nodes() && p.error_count() > errors_before {
        p.start_node_at(checkpoint, ERROR);
        p.finish_node();
    }
}

/// Zero or more productions, up to a stop token or EOF. The budget is
/// checked before each one.
pub(crate) fn list(
    p: &mut Parser<'_>,
    rules: &[Rule],
    stop: &[SyntaxKind],
    context: &str,
) -> usize {
    let mut count = 0;
    while !p.out_of_budget() && !p.at(EOF) && !p.at_any(stop) {
        production(p, rules, context);
        count += 1;
    }
    count
}

/// One or more productions.
pub(crate) fn list1(p: &mut Parser<'_>, rules: &[Rule], stop: &[SyntaxKind], context: &str) {
    if list(p, rules, stop, context) == 0 {
        p.error_expected(context);
    }
}

/// `source_file`: top-level items until EOF. An empty file is accepted.
pub(crate) fn source_file(p: &mut Parser<'_>) {
    list(p, items::TOP_LEVEL, &[], "block, definition, package or directive");
}

pub(crate) fn expect_is_or_as(p: &mut Parser<'_>) {
    if !p.eat(IS_KW) && !p.eat(AS_KW) {
        p.error_expected("'IS' or 'AS'");
    }
}

/// Comma-separated repetition of `item`.
pub(crate) fn comma_list(p: &mut Parser<'_>, mut item: impl FnMut(&mut Parser<'_>)) {
    loop {
        item(p);
        if !p.eat(COMMA) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse, SyntaxKind::*};

    #[test]
    fn test_top_level_order() {
        let parse = parse(
            "BEGIN NULL; END;\n\
             PROCEDURE p IS BEGIN NULL; END;\n\
             {% include \"x.sql\" %}",
        );
        assert!(parse.errors.is_empty(), "{:?}", parse.errors);
        let kinds: Vec<_> = parse.syntax().children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![BLOCK_STMT, PROCEDURE_DEF, DIRECTIVE_STMT]);
    }

    #[test]
    fn test_unknown_top_level_item_recovers() {
        let parse = parse("x := 1; BEGIN NULL; END;");
        assert_eq!(parse.errors.len(), 1);
        assert!(parse.errors[0].message.starts_with("expected block"));
        let kinds: Vec<_> = parse.syntax().children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![ERROR, BLOCK_STMT]);
    }

    #[test]
    fn test_error_nodes_are_marked_on_request() {
        use crate::{parse_with_options, ParseOptions};

        let input = "BEGIN x := ; y := 1; END;";
        let plain = parse(input);
        assert!(plain.syntax().descendants().all(|n| n.kind() != ERROR));

        let options = ParseOptions::default().with_error_nodes();
        let marked = parse_with_options(input, &options);
        let wrapped: Vec<_> = marked
            .syntax()
            .descendants()
            .filter(|n| n.kind() == ERROR)
            .filter_map(|n| n.first_child())
            .map(|n| n.kind())
            .collect();
        // The failing statement and every enclosing production are marked
        assert!(wrapped.contains(&ASSIGNMENT_STMT));
        assert!(wrapped.contains(&BLOCK_STMT));
        assert_eq!(marked.syntax().to_string(), input);
    }
}
