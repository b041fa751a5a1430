//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use modulith::parsers::html::srcset::parse_srcset;

    #[test]
    fn empty_value() {
        assert!(parse_srcset("").unwrap().is_empty());
        assert!(parse_srcset("   \t \n ").unwrap().is_empty());
        assert!(parse_srcset(",,, ,").unwrap().is_empty());
    }

    #[test]
    fn single_url_without_descriptor() {
        let candidates = parse_srcset("image.png").unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "image.png");
        assert_eq!(candidates[0].url_offset, 0);
        assert_eq!(candidates[0].width, None);
        assert_eq!(candidates[0].density, None);
        assert_eq!(candidates[0].height, None);
    }

    #[test]
    fn no_descriptors_one_candidate_per_segment() {
        let candidates = parse_srcset("a.png, b.png, c.png").unwrap();

        assert_eq!(candidates.len(), 3);
        for candidate in &candidates {
            assert_eq!(candidate.width, None);
            assert_eq!(candidate.density, None);
            assert_eq!(candidate.height, None);
        }
        assert_eq!(candidates[0].url, "a.png");
        assert_eq!(candidates[1].url, "b.png");
        assert_eq!(candidates[2].url, "c.png");
    }

    #[test]
    fn width_descriptors() {
        let candidates = parse_srcset("small.jpg 480w, large.jpg 800w").unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].url, "small.jpg");
        assert_eq!(candidates[0].width, Some(480));
        assert_eq!(candidates[1].url, "large.jpg");
        assert_eq!(candidates[1].width, Some(800));
    }

    #[test]
    fn density_descriptors() {
        let candidates = parse_srcset("normal.jpg 1x, retina.jpg 2.5x").unwrap();

        assert_eq!(candidates[0].density, Some(1.0));
        assert_eq!(candidates[1].density, Some(2.5));
    }

    #[test]
    fn width_and_height_together() {
        let candidates = parse_srcset("banner.jpg 800w 600h").unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].width, Some(800));
        assert_eq!(candidates[0].height, Some(600));
    }

    #[test]
    fn url_offsets_are_byte_positions_within_value() {
        let value = "small.jpg 480w, large.jpg 800w";
        let candidates = parse_srcset(value).unwrap();

        assert_eq!(candidates[0].url_offset, 0);
        assert_eq!(candidates[1].url_offset, 16);
        assert_eq!(
            &value[candidates[1].url_offset..candidates[1].url_offset + 9],
            "large.jpg"
        );
    }

    #[test]
    fn trailing_comma_terminates_candidate() {
        let candidates = parse_srcset("a.png,b.png 2x").unwrap();

        // `a.png,b.png` 是一个连续的非空白段，首个候选的 URL 其实是
        // 整段减去逗号后的拆分结果——逗号只在空白边界处切分候选
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "a.png,b.png");
        assert_eq!(candidates[0].density, Some(2.0));
    }

    #[test]
    fn comma_separated_with_whitespace() {
        let candidates = parse_srcset("a.png , b.png 2x").unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].url, "a.png");
        assert_eq!(candidates[1].url, "b.png");
        assert_eq!(candidates[1].density, Some(2.0));
    }

    #[test]
    fn url_with_trailing_commas_has_no_descriptors() {
        let candidates = parse_srcset("a.png,, b.png 100w").unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].url, "a.png");
        assert_eq!(candidates[0].width, None);
        assert_eq!(candidates[1].width, Some(100));
    }

    #[test]
    fn parenthesized_descriptor_content_is_opaque() {
        // 括号内的空白和逗号不会切分描述符，但括号描述符本身
        // 不是合法形态，应当报错而不是 panic
        let result = parse_srcset("a.png (min-width, 10px)");

        assert!(result.is_err());
    }

    #[test]
    fn newlines_between_candidates() {
        let candidates = parse_srcset("a.png 1x,\n\t b.png 2x").unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].url, "b.png");
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use modulith::parsers::html::srcset::{parse_srcset, SrcsetError};

    #[test]
    fn duplicate_width_descriptor() {
        let result = parse_srcset("a.jpg 100w 200w");

        assert_eq!(result, Err(SrcsetError::Conflicting("200w".to_string())));
    }

    #[test]
    fn zero_width_is_invalid() {
        let result = parse_srcset("a.jpg 0w");

        assert_eq!(result, Err(SrcsetError::InvalidWidth("0w".to_string())));
    }

    #[test]
    fn negative_density_is_invalid() {
        let result = parse_srcset("a.jpg -1x");

        assert_eq!(result, Err(SrcsetError::InvalidDensity("-1x".to_string())));
    }

    #[test]
    fn zero_height_is_invalid() {
        let result = parse_srcset("a.jpg 0h");

        assert_eq!(result, Err(SrcsetError::InvalidHeight("0h".to_string())));
    }

    #[test]
    fn width_conflicts_with_density() {
        let result = parse_srcset("a.jpg 100w 2x");

        assert_eq!(result, Err(SrcsetError::Conflicting("2x".to_string())));
    }

    #[test]
    fn height_conflicts_with_density() {
        let result = parse_srcset("a.jpg 2x 300h");

        assert_eq!(result, Err(SrcsetError::Conflicting("300h".to_string())));
    }

    #[test]
    fn unknown_descriptor_shape() {
        let result = parse_srcset("a.jpg 100q");

        assert_eq!(result, Err(SrcsetError::Unknown("100q".to_string())));
    }

    #[test]
    fn non_numeric_width() {
        let result = parse_srcset("a.jpg abcw");

        assert_eq!(result, Err(SrcsetError::InvalidWidth("abcw".to_string())));
    }

    #[test]
    fn one_bad_candidate_fails_the_whole_parse() {
        let result = parse_srcset("good.jpg 1x, bad.jpg 0w, fine.jpg 2x");

        assert_eq!(result, Err(SrcsetError::InvalidWidth("0w".to_string())));
    }
}
