use micro_http_spec::FunctionError;
use micro_http_spec::extension::{BeginExView, EndExView, RouteExView, begin_ex, end_ex, route_ex};
use micro_http_spec::payload::PayloadGenerator;
use proptest::prelude::*;

fn pair() -> impl Strategy<Value = (String, String)> {
    ("[a-z:-]{0,24}", "\\PC{0,48}")
}

proptest! {
    #[test]
    fn prop_payload_lengths(seed in any::<u64>(), len in 0usize..512) {
        let mut generator = PayloadGenerator::seeded(seed);

        prop_assert_eq!(generator.random_bytes(len).len(), len);
        prop_assert_eq!(generator.random_ascii(len).len(), len);
        prop_assert_eq!(generator.random_bytes_utf8(len).len(), len);
    }

    #[test]
    fn prop_ascii_decodes(seed in any::<u64>(), len in 0usize..512) {
        let ascii = PayloadGenerator::seeded(seed).random_ascii(len);

        prop_assert!(ascii.iter().all(|b| (0x20..=0x7E).contains(b)));
    }

    #[test]
    fn prop_utf8_decodes(seed in any::<u64>(), len in 0usize..512) {
        let bytes = PayloadGenerator::seeded(seed).random_bytes_utf8(len);

        prop_assert!(std::str::from_utf8(&bytes).is_ok());
    }

    #[test]
    fn prop_unaligned_utf8(seed in any::<u64>(), len in 0usize..256, split in any::<prop::sample::Index>()) {
        let split_at = split.index(len + 1);
        let bytes = PayloadGenerator::seeded(seed).random_bytes_unaligned_utf8(len, split_at).unwrap();

        prop_assert_eq!(bytes.len(), len);
        let text = std::str::from_utf8(&bytes);
        prop_assert!(text.is_ok());
        if split_at > 0 && split_at < len {
            prop_assert!(!text.unwrap().is_char_boundary(split_at));
        }
    }

    #[test]
    fn prop_unaligned_utf8_rejects_split_past_end(len in 0usize..256, excess in 1usize..64) {
        let result = PayloadGenerator::seeded(0).random_bytes_unaligned_utf8(len, len + excess);

        prop_assert!(
            matches!(result, Err(FunctionError::Precondition { .. })),
            "expected a precondition failure for split {} of {}, got {:?}",
            len + excess,
            len,
            result
        );
    }

    #[test]
    fn prop_invalid_utf8_fails(seed in any::<u64>(), len in 1usize..512) {
        let bytes = PayloadGenerator::seeded(seed).random_bytes_invalid_utf8(len).unwrap();

        prop_assert_eq!(bytes.len(), len);
        prop_assert!(std::str::from_utf8(&bytes).is_err());
    }

    #[test]
    fn prop_case_not_differs(seed in any::<u64>(), value in "[a-zA-Z][a-zA-Z0-9-]{0,16}") {
        let randomized = PayloadGenerator::seeded(seed).random_case_not(&value).unwrap();

        prop_assert_ne!(&randomized, &value);
        prop_assert_eq!(randomized.to_ascii_lowercase(), value.to_ascii_lowercase());
    }

    #[test]
    fn prop_case_not_differs_for_latin_letters(seed in any::<u64>(), value in "[à-öø-þÀ-ÖØ-Þ][a-zà-ö0-9 -]{0,16}") {
        let randomized = PayloadGenerator::seeded(seed).random_case_not(&value).unwrap();

        prop_assert_ne!(&randomized, &value);
        prop_assert_eq!(randomized.chars().count(), value.chars().count());
        prop_assert_eq!(randomized.to_lowercase(), value.to_lowercase());
    }

    #[test]
    fn prop_route_round_trip(headers in prop::collection::vec(pair(), 0..8), overrides in prop::collection::vec(pair(), 0..8)) {
        let builder = headers.iter().fold(route_ex(), |builder, (name, value)| builder.header(name, value));
        let builder = overrides.iter().fold(builder, |builder, (name, value)| builder.r#override(name, value));
        let bytes = builder.build();

        let route = RouteExView::wrap(&bytes).unwrap();

        prop_assert_eq!(route.limit(), bytes.len());
        let decoded: Vec<_> = route.headers().iter().map(|h| (h.name().to_owned(), h.value().to_owned())).collect();
        prop_assert_eq!(decoded, headers);
        let decoded: Vec<_> = route.overrides().iter().map(|h| (h.name().to_owned(), h.value().to_owned())).collect();
        prop_assert_eq!(decoded, overrides);
    }

    #[test]
    fn prop_stream_round_trip(type_id in any::<i32>(), pairs in prop::collection::vec(pair(), 0..8)) {
        let bytes = pairs.iter().fold(begin_ex().type_id(type_id), |builder, (name, value)| builder.header(name, value)).build();
        let begin = BeginExView::wrap(&bytes).unwrap();

        prop_assert_eq!(begin.type_id(), type_id);
        prop_assert_eq!(begin.limit(), bytes.len());
        prop_assert_eq!(begin.headers().len(), pairs.len());

        let bytes = pairs.iter().fold(end_ex().type_id(type_id), |builder, (name, value)| builder.trailer(name, value)).build();
        let end = EndExView::wrap(&bytes).unwrap();

        prop_assert_eq!(end.type_id(), type_id);
        let decoded: Vec<_> = end.trailers().iter().map(|h| (h.name().to_owned(), h.value().to_owned())).collect();
        prop_assert_eq!(decoded, pairs);
    }
}
