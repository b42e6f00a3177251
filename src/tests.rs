use crate::config::{self, Config};
use crate::{from_dom, from_read, from_string, get_attr_val, parse, Error, Handle};
use markup5ever_rcdom::NodeData;
use std::fmt;
use std::io;

/// Like assert_eq!(), but prints out the results normally as well
macro_rules! assert_eq_str {
    ($a:expr, $b:expr) => {
        if $a != $b {
            println!("<<<\n{}===\n{}>>>", $a, $b);
            assert_eq!($a, $b);
        }
    };
}
#[track_caller]
fn test_html(input: &[u8], expected: &str) {
    let output = from_read(input).unwrap();
    assert_eq_str!(output, expected);
}
#[track_caller]
fn test_html_conf<F>(input: &[u8], expected: &str, conf: F)
where
    F: Fn(Config) -> Config,
{
    let result = conf(config::plain()).string_from_read(input).unwrap();
    assert_eq_str!(result, expected);
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

#[test]
fn test_plain_text() {
    test_html(b"  Hello   world,\n\tagain  ", "Hello world, again");
}

#[test]
fn test_para() {
    test_html(b"<p>One</p>\n<p>Two</p>", "One\n\nTwo");
}

#[test]
fn test_br() {
    test_html(b"a<br>b<br/>c", "a\nb\nc");
}

#[test]
fn test_h1() {
    test_html(b"<h1>Hi</h1>", "**\nHi\n**");
}

#[test]
fn test_h2() {
    test_html(b"<h2>Hello</h2>", "-----\nHello\n-----");
}

#[test]
fn test_h3() {
    test_html(b"<h3>Hi</h3>", "Hi\n--");
}

#[test]
fn test_header_between_text() {
    test_html(
        b"before<h1>Title</h1>after",
        "\
before

*****
Title
*****

after",
    );
}

#[test]
fn test_header_with_markup() {
    test_html(b"<h2>a <b>b</b></h2>", "-----\na *b*\n-----");
}

#[test]
fn test_header_counts_chars() {
    test_html("<h1>你好</h1>".as_bytes(), "**\n你好\n**");
    test_html("<h3>café</h3>".as_bytes(), "café\n----");
}

#[test]
fn test_header_multiline() {
    // Only the first line carries the separating space.
    test_html(b"<h2>ab<br>cdef</h2>", "---\nab\ncdef\n---");
    test_html(b"<h1>abcdef<br>x</h1>", "******\nabcdef\nx\n******");
}

#[test]
fn test_header_in_blockquote() {
    test_html(
        b"<blockquote><h3>Hi</h3></blockquote>",
        "> \n> \n> \n>  Hi\n> --\n> \n>",
    );
}

#[test]
fn test_header_in_blockquote_wraps() {
    let title = "word ".repeat(30);
    let output = from_string(&format!("<blockquote><h2>{}</h2></blockquote>", title)).unwrap();
    let divider = format!("> {}", "-".repeat(149));
    assert!(output.lines().all(|l| l.starts_with('>')), "{:?}", output);
    assert_eq!(output.lines().filter(|l| *l == divider).count(), 2);
    assert!(output.lines().filter(|l| l.contains("word")).count() > 1);
}

#[test]
fn test_div() {
    test_html(b"<div>a</div><div>b</div>", "a\nb");
}

#[test]
fn test_div_after_text() {
    test_html(b"x<div>a</div>y", "x\na\ny");
}

#[test]
fn test_nested_div_single_newline() {
    test_html(b"<div><div>a</div></div>b", "a\nb");
}

#[test]
fn test_ul() {
    test_html(
        br#"
        <ul>
          <li>Item one</li>
          <li>Item two</li>
        </ul>"#,
        "* Item one\n* Item two",
    );
}

#[test]
fn test_list_between_paras() {
    test_html(
        b"<p>Intro</p><ul><li>x</li></ul><p>Outro</p>",
        "Intro\n\n* x\n\nOutro",
    );
}

#[test]
fn test_strong() {
    test_html(b"Some <b>bold</b> and <strong>strong</strong> text", "Some *bold* and *strong* text");
}

#[test]
fn test_other_inline() {
    test_html(b"<span>a</span><em>b</em>", "a b");
}

#[test]
fn test_link_mailto() {
    test_html(
        br#"<a href="mailto:a@b.com">Contact</a>"#,
        "Contact ( a@b.com )",
    );
}

#[test]
fn test_link() {
    test_html(
        br#"See <a href=" http://example.com/ ">here</a> for more"#,
        "See here ( http://example.com/ ) for more",
    );
}

#[test]
fn test_link_image() {
    test_html(
        br#"<a href="http://x"><img alt="Logo" src="logo.png"></a>"#,
        "Logo ( http://x )",
    );
}

#[test]
fn test_link_image_no_alt() {
    test_html(br#"<a href="http://x"><img src="logo.png"></a>"#, "( http://x )");
}

#[test]
fn test_link_no_href() {
    test_html(br#"<a name="top">anchor</a>"#, "anchor");
    test_html(br#"<a href="  ">blank</a>"#, "blank");
    test_html(br#"<a href="mailto:">empty</a>"#, "empty");
}

#[test]
fn test_omit_links() {
    test_html_conf(
        br#"<a href="http://x">text</a> <a href="http://y"><img alt="pic"></a>"#,
        "text pic",
        |conf| conf.omit_links(true),
    );
}

#[test]
fn test_blockquote() {
    test_html(b"<blockquote>Quote</blockquote>", "> \n> Quote");
}

#[test]
fn test_blockquote_nested() {
    test_html(
        b"<blockquote>a<blockquote>b</blockquote>c</blockquote>after",
        "> \n> a\n>> b\n> \n> c\n\nafter",
    );
}

#[test]
fn test_blockquote_prefix_depth() {
    let html = b"<blockquote><blockquote><blockquote>one<br>two<br>three</blockquote></blockquote></blockquote>";
    let output = from_read(&html[..]).unwrap();
    let deepest: Vec<_> = output
        .lines()
        .filter(|l| l.contains("one") || l.contains("two") || l.contains("three"))
        .collect();
    assert_eq!(deepest, vec![">>> one", ">>> two", ">>> three"]);
}

#[test]
fn test_blockquote_wrap() {
    let html = format!("<blockquote>{}</blockquote>", "word ".repeat(40));
    let output = from_string(&html).unwrap();
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "> ");
    for line in &lines[1..] {
        let body = line.strip_prefix("> ").unwrap();
        assert!(body.chars().count() <= 74, "{:?}", line);
        assert!(body.split(' ').all(|w| w == "word"), "{:?}", line);
    }
    assert_eq!(lines[1].matches("word").count(), 15);
    assert_eq!(lines[3].matches("word").count(), 10);
}

#[test]
fn test_blockquote_long_word_unbroken() {
    let word = "x".repeat(100);
    let html = format!("<blockquote>{} y</blockquote>", word);
    test_html(html.as_bytes(), &format!("> \n> {}\n> y", word));
}

#[test]
fn test_quote_wrap_width() {
    test_html_conf(
        b"<blockquote>aaa bbb ccc</blockquote>",
        "> \n> aaa bbb\n> ccc",
        |conf| conf.quote_wrap_width(8),
    );
}

#[test]
fn test_no_wrap_outside_quote() {
    let text = "word ".repeat(40);
    let output = from_string(&format!("<p>{}</p>", text)).unwrap();
    assert_eq!(output, text.trim_end());
}

#[test]
fn test_table() {
    test_html(
        br##"
   <table>
     <tr><th>A</th><th>B</th></tr>
     <tr><td>1</td><td>2</td></tr>
   </table>
"##,
        "\
+---+---+
| A | B |
+---+---+
| 1 | 2 |
+---+---+",
    );
}

#[test]
fn test_table_between_paras() {
    test_html(
        b"<p>before</p><table><tr><td>cell</td></tr></table><p>after</p>",
        "\
before

+------+
| cell |
+------+

after",
    );
}

#[test]
fn test_table_headers_case() {
    let html = b"<table><tr><th>Name</th></tr><tr><td>x</td></tr></table>";
    test_html(
        html,
        "\
+------+
| NAME |
+------+
| x    |
+------+",
    );
    test_html_conf(
        html,
        "\
+------+
| Name |
+------+
| x    |
+------+",
        |conf| conf.uppercase_table_headers(false),
    );
}

#[test]
fn test_table_footer() {
    test_html(
        b"<table><tr><td>x</td></tr><tfoot><tr><td>total</td></tr></tfoot></table>",
        "\
+-------+
| x     |
+-------+
| TOTAL |
+-------+",
    );
}

#[test]
fn test_table_empty() {
    test_html(b"a<table></table>b", "a\n\nb");
}

#[test]
fn test_cell_children_on_separate_lines() {
    test_html(
        b"<table><tr><td><b>x</b> y</td></tr></table>",
        "\
+-----+
| *x* |
| y   |
+-----+",
    );
}

#[test]
fn test_nested_table() {
    let output = from_read(
        &b"<table><tr><td><table><tr><td>in</td></tr></table></td><td>out</td></tr></table>"[..],
    )
    .unwrap();
    assert_eq_str!(
        output,
        "\
+--------+-----+
| +----+ | out |
| | in | |     |
| +----+ |     |
+--------+-----+"
    );
    assert!(!output.contains('<'));
}

#[test]
fn test_nested_table_keeps_config() {
    test_html_conf(
        b"<table><tr><td><table><tr><th>in</th></tr></table></td></tr></table>",
        "\
+--------+
| +----+ |
| | in | |
| +----+ |
+--------+",
        |conf| conf.uppercase_table_headers(false),
    );
}

#[test]
fn test_skipped_elements() {
    test_html(
        b"<html><head><title>T</title><style>p { color: red }</style></head>\
          <body>text<script>var x = 1;</script></body></html>",
        "text",
    );
}

#[test]
fn test_bom() {
    test_html(b"\xEF\xBB\xBFhello", "hello");
    assert_eq!(from_string("\u{feff}hello").unwrap(), "hello");
}

#[test]
fn test_deterministic() {
    let html = br#"<h1>T</h1><blockquote>q <a href="http://x">l</a></blockquote>
                   <table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>"#;
    let first = from_read(&html[..]).unwrap();
    let second = from_read(&html[..]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_from_dom() {
    let dom = parse(&b"<div><p>one</p><p>two <b>three</b></p></div>"[..]).unwrap();
    assert_eq!(from_dom(&dom.document).unwrap(), "one\n\ntwo *three*");
    let b = find_element(&dom.document, "b").unwrap();
    assert_eq!(from_dom(&b).unwrap(), "*three*");
}

#[test]
fn test_get_attr_val() {
    let dom = parse(&br#"<a href="http://x" title="t">link</a>"#[..]).unwrap();
    let a = find_element(&dom.document, "a").unwrap();
    assert_eq!(get_attr_val(&a, "href"), "http://x");
    assert_eq!(get_attr_val(&a, "title"), "t");
    assert_eq!(get_attr_val(&a, "alt"), "");
    assert_eq!(get_attr_val(&dom.document, "href"), "");
}

struct FailingSink;

impl fmt::Write for FailingSink {
    fn write_str(&mut self, _s: &str) -> fmt::Result {
        Err(fmt::Error)
    }
}

#[test]
fn test_sink_error() {
    let dom = parse(&b"<p>hi</p>"[..]).unwrap();
    let err = config::plain()
        .render_raw_into(&dom.document, &mut FailingSink)
        .unwrap_err();
    assert_eq!(err, Error::FmtError(fmt::Error));
}

#[test]
fn test_render_raw() {
    let dom = parse(&b"<p>hi</p>"[..]).unwrap();
    let mut raw = String::new();
    config::plain()
        .render_raw_into(&dom.document, &mut raw)
        .unwrap();
    assert_eq!(raw, "\n\nhi\n\n");
}

struct FailingReader;

impl io::Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "read failed"))
    }
}

#[test]
fn test_read_error() {
    let err = from_read(FailingReader).unwrap_err();
    assert_eq!(
        err,
        Error::IoError(io::Error::new(io::ErrorKind::Other, "other"))
    );
}
