use tagson::parse::parse;
use tagson::*;

macro_rules! do_test {
    ($s:expr, $ans:expr) => {{
        let s: &str = $s;
        let ans: &Value = $ans;

        match parse(s) {
            Err(e) => {
                println!("************** JSON TEXT    **************\n{}", s);
                println!("************** ERROR OUTPUT **************\n{:?}", e);
                panic!("errored");
            }
            Ok(res) => {
                assert_eq!(&res, ans);
            }
        }
    }};
}

#[test]
fn primitives() {
    do_test!("null", &Value::Null);
    do_test!("true", &Value::Bool(true));
    do_test!("false", &Value::Bool(false));
    do_test!("0", &Value::new_num(0));
    do_test!("101", &Value::new_num(101));
    do_test!("-34", &Value::new_num(-34));
    do_test!("3.5", &Value::new_num(3.5));
    do_test!("-0.25", &Value::new_num(-0.25));
    do_test!("1e3", &Value::new_num(1000.0));
    do_test!("\"hello\"", &Value::new_str("hello"));
    do_test!("\"\"", &Value::new_str(""));
}

#[test]
fn number_classes() {
    // equality is cross-class, so inspect the parsed class directly
    let class = |s: &str| match parse(s).unwrap() {
        Value::Num(Number::Uint(_)) => "uint",
        Value::Num(Number::Int(_)) => "int",
        Value::Num(Number::Float(_)) => "float",
        _ => panic!("not a number"),
    };

    assert_eq!(class("101"), "uint");
    assert_eq!(class("0"), "uint");
    assert_eq!(class("-34"), "int");
    assert_eq!(class("3.0"), "float");
    assert_eq!(class("1e3"), "float");
    assert_eq!(class("-0.0"), "float");
    // beyond u128, integers degrade to the float class
    assert_eq!(class("340282366920938463463374607431768211456"), "float");
}

#[test]
fn string_escapes() {
    do_test!(r#""a\"b\\c""#, &Value::new_str("a\"b\\c"));
    do_test!(r#""\b\f\n\r\t\/""#, &Value::new_str("\u{8}\u{c}\n\r\t/"));
    do_test!(r#""\u0041\u00e9""#, &Value::new_str("Aé"));
    do_test!(r#""\ud83d\ude00""#, &Value::new_str("😀"));
    do_test!("\"héllo ☃\"", &Value::new_str("héllo ☃"));
}

#[test]
fn collections() {
    do_test!("[]", &Value::Seq(vec![]));
    do_test!(
        "[1, \"two\", null, [true]]",
        &Value::Seq(vec![
            Value::new_num(1),
            Value::new_str("two"),
            Value::Null,
            Value::Seq(vec![Value::Bool(true)]),
        ])
    );
    do_test!("{}", &Value::Map(Fields::new()));
    do_test!(
        r#"{"a": 1, "b": {"c": [2, 3]}}"#,
        &Value::new_map(vec![
            ("a".to_string(), Value::new_num(1)),
            (
                "b".to_string(),
                Value::new_map(vec![(
                    "c".to_string(),
                    Value::Seq(vec![Value::new_num(2), Value::new_num(3)]),
                )]),
            ),
        ])
    );
}

#[test]
fn whitespace_tolerance() {
    let expected = Value::new_map(vec![(
        "a".to_string(),
        Value::Seq(vec![Value::new_num(1), Value::new_num(2)]),
    )]);

    do_test!("{\"a\":[1,2]}", &expected);
    do_test!("  {  \"a\" : [ 1 , 2 ] }  ", &expected);
    do_test!("\n{\r\n\t\"a\"\n:\n[\n1\n,\n2\n]\n}\n", &expected);
}

#[test]
fn field_order_is_preserved() {
    let v = parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
    let keys: Vec<_> = v.fields().unwrap().keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn rejection_grid() {
    for bad in [
        "",
        "  \n ",
        "nul",
        "True",
        "+1",
        "01",
        "1.",
        ".5",
        "1e",
        "'single'",
        "\"unterminated",
        "\"bad \\x\"",
        "[1 2]",
        "[1, 2,]",
        "[,]",
        "[1, 2",
        "{\"a\"}",
        "{\"a\": }",
        "{\"a\": 1,}",
        "{\"a\": 1",
        "{a: 1}",
        "{1: 2}",
        "{\"a\": 1} {\"b\": 2}",
        "[1] trailing",
    ] {
        assert!(parse(bad).is_err(), "accepted: {:?}", bad);
    }
}

#[test]
fn backtrace_renders_with_carets() {
    let text = "{\"items\": [1, 2,]}";
    let err = parse(text).unwrap_err();

    assert_eq!(
        err.backtrace(),
        r##"#0: at 1:16 :: expected ']', found ','
{"items": [1, 2,]}
               ^

#1: at 1:11 :: in array
{"items": [1, 2,]}
          ^

#2: at 1:2 :: in object member
{"items": [1, 2,]}
 ^

#3: at 1:1 :: in object
{"items": [1, 2,]}
^"##
    );
}

#[test]
fn trace_fields_are_addressable() {
    let err = parse("[1, oops]").unwrap_err();
    let trace = err.get(0).unwrap();
    assert_eq!(trace.line, 1);
    assert!(trace.col > 1);
    assert_eq!(trace.linestr, "[1, oops]");
}
