//! CommonMark behaviour, checked through the full conversion pipeline.

use markwright_engine::{Settings, convert_str};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn html(input: &str) -> String {
    convert_str(input, &Settings::default()).unwrap()
}

#[rstest]
#[case::tab_indented_code("\tfoo\tbaz\t\tbim\n", "<pre><code>foo\tbaz\t\tbim\n</code></pre>\n")]
#[case::spaces_then_tab("  \tfoo\tbaz\t\tbim\n", "<pre><code>foo\tbaz\t\tbim\n</code></pre>\n")]
#[case::three_breaks("***\n---\n___\n", "<hr />\n<hr />\n<hr />\n")]
#[case::plus_is_not_a_break("+++\n", "<p>+++</p>\n")]
#[case::spaced_break(" - - -\n", "<hr />\n")]
#[case::break_interrupts("Foo\n***\nbar\n", "<p>Foo</p>\n<hr />\n<p>bar</p>\n")]
#[case::break_between_lists(
    "* Foo\n* * *\n* Bar\n",
    "<ul>\n<li>Foo</li>\n</ul>\n<hr />\n<ul>\n<li>Bar</li>\n</ul>\n"
)]
fn tabs_and_thematic_breaks(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[rstest]
#[case::levels("# foo\n## foo\n###### foo\n", "<h1>foo</h1>\n<h2>foo</h2>\n<h6>foo</h6>\n")]
#[case::seven_hashes("####### foo\n", "<p>####### foo</p>\n")]
#[case::needs_space("#5 bolt\n", "<p>#5 bolt</p>\n")]
#[case::inline_content("# foo *bar* \\*baz\\*\n", "<h1>foo <em>bar</em> *baz*</h1>\n")]
#[case::closing_sequence("## foo ##\n", "<h2>foo</h2>\n")]
#[case::not_a_closing_sequence("### foo ### b\n", "<h3>foo ### b</h3>\n")]
#[case::empty("#\n", "<h1></h1>\n")]
#[case::trailing_spaces("### foo  \n", "<h3>foo</h3>\n")]
#[case::setext_inline("Foo *bar*\n=========\n", "<h1>Foo <em>bar</em></h1>\n")]
#[case::setext_multiline("Foo\nbar\n---\nbaz\n", "<h2>Foo\nbar</h2>\n<p>baz</p>\n")]
#[case::setext_needs_paragraph(
    "> foo\n-----\n",
    "<blockquote>\n<p>foo</p>\n</blockquote>\n<hr />\n"
)]
fn headings(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[rstest]
#[case::indented(
    "    a simple\n      indented code block\n",
    "<pre><code>a simple\n  indented code block\n</code></pre>\n"
)]
#[case::cannot_interrupt("Foo\n    bar\n", "<p>Foo\nbar</p>\n")]
#[case::interior_blank_lines(
    "    chunk1\n\n    chunk2\n  \n \n \n    chunk3\n",
    "<pre><code>chunk1\n\nchunk2\n\n\n\nchunk3\n</code></pre>\n"
)]
#[case::fenced_escaping("```\n<\n >\n```\n", "<pre><code>&lt;\n &gt;\n</code></pre>\n")]
#[case::two_backticks_is_a_span("``\nfoo\n``\n", "<p><code>foo</code></p>\n")]
#[case::other_fence_char("```\naaa\n~~~\n```\n", "<pre><code>aaa\n~~~\n</code></pre>\n")]
#[case::unclosed_empty("```\n", "<pre><code></code></pre>\n")]
#[case::fence_indent_removed(" ```\n aaa\naaa\n```\n", "<pre><code>aaa\naaa\n</code></pre>\n")]
#[case::info_string(
    "```ruby\ndef foo(x)\n  return 3\nend\n```\n",
    "<pre><code class=\"language-ruby\">def foo(x)\n  return 3\nend\n</code></pre>\n"
)]
#[case::fence_interrupts(
    "foo\n```\nbar\n```\nbaz\n",
    "<p>foo</p>\n<pre><code>bar\n</code></pre>\n<p>baz</p>\n"
)]
fn code_blocks(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[rstest]
#[case::ends_at_blank_line(
    "<table><tr><td>\n<pre>\n**Hello**,\n\n_world_.\n</pre>\n</td></tr></table>\n",
    "<table><tr><td>\n<pre>\n**Hello**,\n<p><em>world</em>.\n</pre></p>\n</td></tr></table>\n"
)]
#[case::comment_ends_on_its_line(
    "<!-- foo -->*bar*\n*baz*\n",
    "<!-- foo -->*bar*\n<p><em>baz</em></p>\n"
)]
#[case::inline_tag_is_not_a_block("<del>*foo*</del>\n", "<p><del><em>foo</em></del></p>\n")]
#[case::nbsp_is_not_tag_whitespace(
    "<a\u{a0}href=\"x\">\n",
    "<p>&lt;a\u{a0}href=&quot;x&quot;&gt;</p>\n"
)]
fn html_blocks(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[rstest]
#[case::with_title(
    "[foo]: /url \"title\"\n\n[foo]\n",
    "<p><a href=\"/url\" title=\"title\">foo</a></p>\n"
)]
#[case::destination_on_next_line("[foo]:\n/url\n\n[foo]\n", "<p><a href=\"/url\">foo</a></p>\n")]
#[case::title_cannot_span_blank_line(
    "[foo]: /url 'title\n\nwith blank line'\n\n[foo]\n",
    "<p>[foo]: /url 'title</p>\n<p>with blank line'</p>\n<p>[foo]</p>\n"
)]
#[case::case_insensitive("[FOO]: /url\n\n[Foo]\n", "<p><a href=\"/url\">Foo</a></p>\n")]
#[case::first_wins(
    "[foo]: first\n[foo]: second\n\n[foo]\n",
    "<p><a href=\"first\">foo</a></p>\n"
)]
fn reference_definitions(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[rstest]
#[case::two_paragraphs("aaa\n\nbbb\n", "<p>aaa</p>\n<p>bbb</p>\n")]
#[case::leading_spaces_dropped("  aaa\n bbb\n", "<p>aaa\nbbb</p>\n")]
#[case::trailing_spaces("aaa     \nbbb     \n", "<p>aaa<br />\nbbb</p>\n")]
#[case::quote_contents(
    "> # Foo\n> bar\n> baz\n",
    "<blockquote>\n<h1>Foo</h1>\n<p>bar\nbaz</p>\n</blockquote>\n"
)]
#[case::list_not_lazy(
    "> - foo\n- bar\n",
    "<blockquote>\n<ul>\n<li>foo</li>\n</ul>\n</blockquote>\n<ul>\n<li>bar</li>\n</ul>\n"
)]
#[case::empty_quote(">\n", "<blockquote>\n</blockquote>\n")]
#[case::separate_quotes(
    "> foo\n\n> bar\n",
    "<blockquote>\n<p>foo</p>\n</blockquote>\n<blockquote>\n<p>bar</p>\n</blockquote>\n"
)]
#[case::nested_lazy(
    "> > > foo\nbar\n",
    "<blockquote>\n<blockquote>\n<blockquote>\n<p>foo\nbar</p>\n</blockquote>\n</blockquote>\n</blockquote>\n"
)]
fn paragraphs_and_quotes(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[rstest]
#[case::item_with_blocks(
    "1.  A paragraph\n    with two lines.\n\n        indented code\n\n    > A block quote.\n",
    "<ol>\n<li>\n<p>A paragraph\nwith two lines.</p>\n<pre><code>indented code\n</code></pre>\n<blockquote>\n<p>A block quote.</p>\n</blockquote>\n</li>\n</ol>\n"
)]
#[case::insufficient_indent("- one\n\n two\n", "<ul>\n<li>one</li>\n</ul>\n<p>two</p>\n")]
#[case::marker_needs_space("-one\n\n2.two\n", "<p>-one</p>\n<p>2.two</p>\n")]
#[case::nine_digits("123456789. ok\n", "<ol start=\"123456789\">\n<li>ok</li>\n</ol>\n")]
#[case::ten_digits("1234567890. not ok\n", "<p>1234567890. not ok</p>\n")]
#[case::bullet_change_starts_new_list(
    "- foo\n- bar\n+ baz\n",
    "<ul>\n<li>foo</li>\n<li>bar</li>\n</ul>\n<ul>\n<li>baz</li>\n</ul>\n"
)]
#[case::ordered_cannot_interrupt_unless_one(
    "The number of windows in my house is\n14.  The number of doors is 6.\n",
    "<p>The number of windows in my house is\n14.  The number of doors is 6.</p>\n"
)]
#[case::gap_between_items(
    "- a\n- b\n\n- c\n",
    "<ul>\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n<li>\n<p>c</p>\n</li>\n</ul>\n"
)]
#[case::loose_inner_tight_outer(
    "- a\n  - b\n\n    c\n- d\n",
    "<ul>\n<li>a\n<ul>\n<li>\n<p>b</p>\n<p>c</p>\n</li>\n</ul>\n</li>\n<li>d</li>\n</ul>\n"
)]
#[case::empty_item("- foo\n-\n- bar\n", "<ul>\n<li>foo</li>\n<li></li>\n<li>bar</li>\n</ul>\n")]
#[case::code_span_precedence(
    "- `one\n- two`\n",
    "<ul>\n<li>`one</li>\n<li>two`</li>\n</ul>\n"
)]
fn lists(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[rstest]
#[case::inner_backtick("`` foo ` bar ``\n", "<p><code>foo ` bar</code></p>\n")]
#[case::stripped_space("` `` `\n", "<p><code>``</code></p>\n")]
#[case::escaped_star("\\*not emphasized*\n", "<p>*not emphasized*</p>\n")]
#[case::backslash_break("foo\\\nbar\n", "<p>foo<br />\nbar</p>\n")]
#[case::backslash_at_end("foo\\\n", "<p>foo\\</p>\n")]
#[case::named_entities("&amp; &copy; &AElig;\n", "<p>&amp; © Æ</p>\n")]
#[case::numeric_entities("&#35; &#1234; &#992; &#0;\n", "<p># Ӓ Ϡ \u{FFFD}</p>\n")]
#[case::unknown_entity("&MadeUpEntity;\n", "<p>&amp;MadeUpEntity;</p>\n")]
#[case::two_code_point_entity("&ngE; &fjlig;\n", "<p>\u{2267}\u{338} fj</p>\n")]
fn code_spans_escapes_entities(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[rstest]
#[case::simple("*foo bar*\n", "<p><em>foo bar</em></p>\n")]
#[case::not_left_flanking("a * foo bar*\n", "<p>a * foo bar*</p>\n")]
#[case::intraword_star("foo*bar*\n", "<p>foo<em>bar</em></p>\n")]
#[case::intraword_underscore("_foo_bar\n", "<p>_foo_bar</p>\n")]
#[case::strong("**foo bar**\n", "<p><strong>foo bar</strong></p>\n")]
#[case::rule_of_three("*foo**bar**baz*\n", "<p><em>foo<strong>bar</strong>baz</em></p>\n")]
#[case::triple_intraword("foo***bar***baz\n", "<p>foo<em><strong>bar</strong></em>baz</p>\n")]
#[case::extra_opener("**foo*\n", "<p>*<em>foo</em></p>\n")]
#[case::extra_closer("*foo**\n", "<p><em>foo</em>*</p>\n")]
#[case::nested_same_char("*foo *bar**\n", "<p><em>foo <em>bar</em></em></p>\n")]
#[case::punctuation_flanking("*(*foo*)*\n", "<p><em>(<em>foo</em>)</em></p>\n")]
fn emphasis(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[rstest]
#[case::inline_with_title("[link](/uri \"title\")\n", "<p><a href=\"/uri\" title=\"title\">link</a></p>\n")]
#[case::empty_destination("[link]()\n", "<p><a href=\"\">link</a></p>\n")]
#[case::pointy_destination("[link](</my uri>)\n", "<p><a href=\"/my%20uri\">link</a></p>\n")]
#[case::pointy_with_paren("[a](<b)c>)\n", "<p><a href=\"b)c\">a</a></p>\n")]
#[case::nested_brackets("[link [foo [bar]]](/uri)\n", "<p><a href=\"/uri\">link [foo [bar]]</a></p>\n")]
#[case::emphasis_stays_outside("*[foo*](/uri)\n", "<p>*<a href=\"/uri\">foo*</a></p>\n")]
#[case::entities_in_parts(
    "[foo](/f&ouml;&ouml; \"f&ouml;&ouml;\")\n",
    "<p><a href=\"/f%C3%B6%C3%B6\" title=\"föö\">foo</a></p>\n"
)]
#[case::image("![foo](/url \"title\")\n", "<p><img src=\"/url\" alt=\"foo\" title=\"title\" /></p>\n")]
#[case::uri_autolink(
    "<http://foo.bar.baz/test?q=hello&id=22&boolean>\n",
    "<p><a href=\"http://foo.bar.baz/test?q=hello&amp;id=22&amp;boolean\">http://foo.bar.baz/test?q=hello&amp;id=22&amp;boolean</a></p>\n"
)]
#[case::email_autolink(
    "<foo@bar.example.com>\n",
    "<p><a href=\"mailto:foo@bar.example.com\">foo@bar.example.com</a></p>\n"
)]
#[case::raw_tags("<a><bab><c2c>\n", "<p><a><bab><c2c></p>\n")]
#[case::multiline_comment(
    "foo <!-- this is a --\ncomment - with hyphens -->\n",
    "<p>foo <!-- this is a --\ncomment - with hyphens --></p>\n"
)]
fn links_and_raw_html(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}
