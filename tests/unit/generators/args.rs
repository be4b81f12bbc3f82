//! Tests for keyword argument access, parsing and count conversion

#[cfg(test)]
mod tests {
    use crate::generators::args::{ArgValue, Args, constant_step, step, to_count, to_counts};
    use crate::io::error::PhantomError;

    // Tests command-line values are parsed into the narrowest matching kind
    // Verified by parsing integers before flags
    #[test]
    fn test_parse_picks_value_kind() {
        assert!(matches!(ArgValue::parse("true"), ArgValue::Bool(true)));
        assert!(matches!(ArgValue::parse("false"), ArgValue::Bool(false)));
        assert!(matches!(ArgValue::parse("2, -3"), ArgValue::Pair([2, -3])));
        assert!(matches!(ArgValue::parse("-7"), ArgValue::Int(-7)));
        assert!(matches!(ArgValue::parse("0.5"), ArgValue::Float(v) if (v - 0.5).abs() < f64::EPSILON));
        assert!(matches!(ArgValue::parse("nearest"), ArgValue::Text(ref t) if t == "nearest"));
        assert!(matches!(ArgValue::parse("1,x"), ArgValue::Text(_)));
    }

    // Tests typed accessors return values and reject other kinds
    // Verified by coercing text to integers
    #[test]
    fn test_typed_accessors() {
        let args = Args::new()
            .with("count", 3)
            .with("flag", true)
            .with("pair", [4, 5])
            .with("name", "linear");

        assert_eq!(args.int("count").expect("integer"), Some(3));
        assert_eq!(args.flag("flag").expect("bool"), Some(true));
        assert_eq!(args.pair("pair").expect("pair"), Some([4, 5]));
        assert_eq!(args.text("name").expect("text"), Some("linear"));
        assert_eq!(args.int("missing").expect("absent is fine"), None);

        let error = args.int("name").expect_err("text is not an integer");
        assert!(matches!(error, PhantomError::InvalidParameter { ref parameter, .. } if parameter == "name"));
    }

    // Tests a single integer stands in for a pair on both axes
    // Verified by rejecting integers where pairs are expected
    #[test]
    fn test_integer_broadcasts_to_pair() {
        let args = Args::new().with("stripe_width", 2);
        assert_eq!(args.pair("stripe_width").expect("broadcast"), Some([2, 2]));
    }

    // Tests pairs become constant step functions and closures pass through
    // Verified by evaluating constant steps at index zero only
    #[test]
    fn test_steps_from_pairs_and_closures() {
        let args = Args::new()
            .with("constant", [1, -2])
            .with("custom", [step(|i| i as i64), constant_step(7)]);

        let [fx, fy] = args.steps("constant").expect("pair").expect("present");
        assert_eq!((fx(1), fx(9), fy(4)), (1, 1, -2));

        let [gx, gy] = args.steps("custom").expect("steps").expect("present");
        assert_eq!((gx(3), gy(3)), (3, 7));
    }

    // Tests unexpected keys are named in the error
    // Verified by checking only the first key
    #[test]
    fn test_ensure_only_names_unexpected_key() {
        let args = Args::new().with("pivot", [0, 0]).with("zoom", 2);

        assert!(args.ensure_only(&["pivot", "zoom"]).is_ok());
        let error = args.ensure_only(&["pivot"]).expect_err("zoom is unexpected");
        let message = error.to_string();
        assert!(message.contains("zoom"));
        assert!(message.contains("pivot"));
    }

    // Tests later inserts replace earlier ones for the same key
    // Verified by keeping the first value
    #[test]
    fn test_last_value_wins() {
        let args = Args::new().with("count", 1).with("count", 2);
        assert_eq!(args.int("count").expect("integer"), Some(2));
        assert_eq!(args.keys().count(), 1);
    }

    // Tests count conversion enforces the minimum and rejects negatives
    // Verified by casting negatives with `as`
    #[test]
    fn test_count_conversion() {
        assert_eq!(to_count("n", 0, 0).expect("zero allowed"), 0);
        assert!(to_count("n", 0, 1).is_err());
        assert!(to_count("n", -4, 0).is_err());
        assert_eq!(to_counts("s", [1, 2], 1).expect("positive"), [1, 2]);

        let error = to_counts("s", [3, -1], 0).expect_err("negative component");
        assert!(error.to_string().contains("(3, -1)"));
    }
}
