//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use modulith::parsers::html::tokenizer::{scan, Quoting};

    fn all(tag: &str, attribute: &str) -> bool {
        let _ = (tag, attribute);
        true
    }

    #[test]
    fn double_quoted_attribute() {
        let text = r#"<img src="image.png">"#;
        let matches = scan(text, all);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].tag, "img");
        assert_eq!(matches[0].attribute, "src");
        assert_eq!(matches[0].value, "image.png");
        assert_eq!(matches[0].quoting, Quoting::Double);
        assert_eq!(
            &text[matches[0].value_start..matches[0].value_start + matches[0].value.len()],
            "image.png"
        );
    }

    #[test]
    fn single_quoted_attribute() {
        let matches = scan("<img src='image.png'>", all);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "image.png");
        assert_eq!(matches[0].quoting, Quoting::Single);
    }

    #[test]
    fn unquoted_attribute() {
        let matches = scan("<img src=image.png>", all);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "image.png");
        assert_eq!(matches[0].quoting, Quoting::Unquoted);
    }

    #[test]
    fn tag_and_attribute_names_are_lowercased() {
        let matches = scan(r#"<IMG SRC="a.png">"#, all);

        assert_eq!(matches[0].tag, "img");
        assert_eq!(matches[0].attribute, "src");
        // 值保持原文
        assert_eq!(matches[0].value, "a.png");
    }

    #[test]
    fn attributes_reported_in_document_order() {
        let matches = scan(
            r#"<video src="movie.mp4" poster="cover.jpg"></video><img src="a.png">"#,
            all,
        );

        let attributes: Vec<&str> = matches.iter().map(|m| m.attribute.as_str()).collect();
        assert_eq!(attributes, vec!["src", "poster", "src"]);
        assert!(matches[0].value_start < matches[1].value_start);
        assert!(matches[1].value_start < matches[2].value_start);
    }

    #[test]
    fn relevance_predicate_filters_by_tag_and_attribute() {
        let matches = scan(
            r#"<img src="a.png"><a href="page.html"></a>"#,
            |tag, attribute| tag == "img" && attribute == "src",
        );

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "a.png");
    }

    #[test]
    fn comments_are_opaque() {
        let matches = scan(r#"<!-- <img src="a.png"> --><img src="b.png">"#, all);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "b.png");
    }

    #[test]
    fn unclosed_comment_swallows_the_rest() {
        let matches = scan(r#"<!-- <img src="a.png">"#, all);

        assert!(matches.is_empty());
    }

    #[test]
    fn cdata_is_opaque() {
        let matches = scan(r#"<![CDATA[ <img src="a.png"> ]]><img src="b.png">"#, all);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "b.png");
    }

    #[test]
    fn doctype_and_closing_tags_are_skipped() {
        let matches = scan(
            "<!DOCTYPE html><html><body></body><img src=\"a.png\"></html>",
            all,
        );

        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn script_content_is_raw_text() {
        let matches = scan(
            r#"<script>var markup = "<img src='fake.png'>";</script><img src="real.png">"#,
            all,
        );

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "real.png");
    }

    #[test]
    fn style_content_is_raw_text() {
        let matches = scan(
            r#"<style>/* <img src="fake.png"> */</style><img src="real.png">"#,
            all,
        );

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "real.png");
    }

    #[test]
    fn self_closing_tag_returns_to_outside() {
        let matches = scan(r#"<img src="a.png" /><img src="b.png">"#, all);

        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn multiline_tag() {
        let matches = scan("<img\n    src=\"a.png\"\n    alt=\"x\">", all);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].attribute, "src");
        assert_eq!(matches[1].attribute, "alt");
    }

    #[test]
    fn empty_value_is_reported() {
        let matches = scan(r#"<img src="">"#, all);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "");
    }

    #[test]
    fn stray_angle_brackets_degrade_gracefully() {
        let matches = scan(r#"1 < 2 > 3 <<< <img src="a.png"> >>>"#, all);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "a.png");
    }

    #[test]
    fn mismatched_quotes_are_not_an_attribute() {
        // 起始双引号配单引号不是合法写法，宽容跳过而不是误配
        let matches = scan(r#"<img src="a.png'>"#, all);

        assert!(matches.is_empty());
    }

    #[test]
    fn arbitrary_bytes_never_panic() {
        let inputs = [
            "<",
            ">",
            "<>",
            "</",
            "<!",
            "<!--",
            "<![CDATA[",
            "<img",
            "<img src=",
            "<img src=\"",
            "=\"'<>`",
            "日本語 <img src=\"図.png\"> テキスト",
            "\u{0}\u{1}\u{2}<\u{3}",
        ];

        for input in inputs {
            let _ = scan(input, |_, _| true);
        }
    }

    #[test]
    fn bare_attributes_are_skipped() {
        let matches = scan(r#"<video controls src="movie.mp4" muted>"#, all);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].attribute, "src");
    }
}
