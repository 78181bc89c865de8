//! Tests for generic access (`get`, `set`, `in`, `delete`) and the
//! form-keyed meta slots that override it.

extern crate jack;

mod common;

use pretty_assertions::assert_eq;

use common::{run_jack, run_jack_with_output};
use jack::runner::ds::error::JErrorType;
use jack::runner::ds::value::JackValue;
use jack::runner::plugin::types::EvalContext;

fn display(source: &str) -> String {
    run_jack(source).unwrap().to_string()
}

// ============================================================================
// Sequences
// ============================================================================

#[test]
fn test_list_get_and_set() {
    assert_eq!(
        display("(@vars l) (@assign l (@list 1 2 3)) (@set l 0 9) l"),
        "[9, 2, 3]"
    );
    assert_eq!(run_jack("(@get (@list 1 2 3) 2)"), Ok(JackValue::integer(3)));
    assert_eq!(run_jack(r#"(@get (@list 1 2 3) "1")"#), Ok(JackValue::integer(2)));
    assert_eq!(run_jack("(@get (@list 1 2 3) 7)"), Ok(JackValue::Null));
}

#[test]
fn test_list_grows_with_null_padding() {
    assert_eq!(
        display("(@vars l) (@assign l (@list 1)) (@set l 3 4) l"),
        "[1, null, null, 4]"
    );
}

#[test]
fn test_tuple_keeps_its_length() {
    assert_eq!(
        display("(@vars t) (@assign t (@tuple 1 2)) (@set t 1 5) t"),
        "(1, 5)"
    );
    assert!(matches!(
        run_jack("(@set (@tuple 1 2) 2 5)"),
        Err(JErrorType::TypeError(_))
    ));
}

#[test]
fn test_delete_leaves_a_hole_in_sequences() {
    assert_eq!(
        display("(@vars l) (@assign l (@list 1 2 3)) (@delete l 1) l"),
        "[1, null, 3]"
    );
    assert_eq!(
        run_jack("(@vars l) (@assign l (@list 1 2 3)) (@delete l 1) (@len l)"),
        Ok(JackValue::integer(3))
    );
}

#[test]
fn test_in_checks_sequence_positions() {
    assert_eq!(run_jack("(@in (@list 5 6) 1)"), Ok(JackValue::Boolean(true)));
    assert_eq!(run_jack("(@in (@list 5 6) 2)"), Ok(JackValue::Boolean(false)));
}

#[test]
fn test_buffers_hold_bytes() {
    let mut ctx = EvalContext::new();
    ctx.define_global("buf", JackValue::new_buffer(vec![1, 2, 3]));
    assert_eq!(ctx.evaluate("(@set buf 0 255) (@get buf 0)"), Ok(JackValue::integer(255)));
    assert!(matches!(
        ctx.evaluate("(@set buf 0 256)"),
        Err(JErrorType::TypeError(_))
    ));
    assert_eq!(ctx.evaluate(r#"(@is buf "Buffer")"#), Ok(JackValue::Boolean(true)));
    assert_eq!(ctx.evaluate("(@delete buf 1) (@get buf 1)"), Ok(JackValue::integer(0)));
    assert_eq!(ctx.evaluate("(@len buf)"), Ok(JackValue::integer(3)));
}

// ============================================================================
// Keyed objects
// ============================================================================

#[test]
fn test_object_get_set_in_delete() {
    let mut ctx = EvalContext::new();
    ctx.define_global("o", JackValue::Null);
    ctx.evaluate(r#"(@assign o (@object "a" 1))"#).unwrap();
    assert_eq!(ctx.evaluate(r#"(@get o "a")"#), Ok(JackValue::integer(1)));
    assert_eq!(ctx.evaluate(r#"(@get o "b")"#), Ok(JackValue::Null));
    assert_eq!(ctx.evaluate(r#"(@in o "a")"#), Ok(JackValue::Boolean(true)));
    ctx.evaluate(r#"(@delete o "a")"#).unwrap();
    assert_eq!(ctx.evaluate(r#"(@in o "a")"#), Ok(JackValue::Boolean(false)));
}

#[test]
fn test_objects_have_no_inherited_members() {
    assert_eq!(
        run_jack(r#"(@in (@object) "toString")"#),
        Ok(JackValue::Boolean(false))
    );
    assert_eq!(
        run_jack(r#"(@get (@object) "constructor")"#),
        Ok(JackValue::Null)
    );
}

#[test]
fn test_symbol_and_string_keys_are_distinct() {
    let result = run_jack(
        r#"
        (@vars o)
        (@assign o (@object 'k 1 "k" 2))
        (@list (@get o 'k) (@get o "k") (@len (@list)))
        "#,
    );
    assert_eq!(result.unwrap().to_string(), "[1, 2, 0]");
}

#[test]
fn test_scalar_keys_convert_to_strings() {
    assert_eq!(
        run_jack(r#"(@get (@object 1 "one") "1")"#),
        Ok(JackValue::string("one"))
    );
    assert_eq!(
        run_jack(r#"(@get (@object null "u") "undefined")"#),
        Ok(JackValue::string("u"))
    );
    assert!(matches!(
        run_jack(r#"(@object (@list) 1)"#),
        Err(JErrorType::TypeError(_))
    ));
}

// ============================================================================
// Non-participating values
// ============================================================================

#[test]
fn test_scalars_and_functions_read_null_and_ignore_writes() {
    assert_eq!(run_jack(r#"(@get "abc" 0)"#), Ok(JackValue::Null));
    assert_eq!(run_jack("(@set 5 0 1)"), Ok(JackValue::Null));
    assert_eq!(run_jack(r#"(@get print "name")"#), Ok(JackValue::Null));
}

#[test]
fn test_scalars_cannot_be_adapted() {
    assert!(matches!(
        run_jack(r#"(@in "abc" "a")"#),
        Err(JErrorType::TypeError(_))
    ));
    assert!(matches!(
        run_jack("(@for 5 [x] x)"),
        Err(JErrorType::TypeError(_))
    ));
}

// ============================================================================
// Meta slots
// ============================================================================

#[test]
fn test_form_keys_address_meta_slots() {
    let result = run_jack(
        r#"
        (@vars o)
        (@assign o (@object))
        (@set o @tag "meta")
        (@list (@get o @tag) (@in o "tag") (@get o "tag"))
        "#,
    );
    assert_eq!(result.unwrap().to_string(), "[meta, false, null]");
}

#[test]
fn test_in_with_a_form_key_checks_the_meta_slot() {
    let result = run_jack(
        r#"
        (@vars o)
        (@assign o (@object "tag" 1))
        (@set o @tag 5)
        (@list (@in o @tag) (@in o @other))
        "#,
    );
    assert_eq!(result.unwrap().to_string(), "[true, false]");
}

#[test]
fn test_delete_with_a_form_key_clears_the_meta_slot() {
    let result = run_jack(
        r#"
        (@vars o)
        (@assign o (@object "tag" 1))
        (@set o @tag 5)
        (@delete o @tag)
        (@list (@in o @tag) (@get o @tag) (@get o "tag"))
        "#,
    );
    assert_eq!(result.unwrap().to_string(), "[false, null, 1]");
}

#[test]
fn test_deleting_a_hook_slot_removes_the_hook() {
    let result = run_jack(
        r#"
        (@vars o)
        (@assign o (@object))
        (@set o @get (@fn "hooked"))
        (@delete o @get)
        (@get o "a")
        "#,
    );
    assert_eq!(result, Ok(JackValue::Null));
}

#[test]
fn test_get_hook_handles_missing_members() {
    let result = run_jack(
        r#"
        (@vars o)
        (@assign o (@object "a" 1))
        (@set o @get (@fn (@params k) (@add "missing " k)))
        (@list (@get o "a") (@get o "b"))
        "#,
    );
    assert_eq!(result.unwrap().to_string(), "[1, missing b]");
}

#[test]
fn test_set_hook_intercepts_new_members() {
    let (result, output) = run_jack_with_output(
        r#"
        (@vars o)
        (@assign o (@object "a" 1))
        (@set o @set (@fn (@params k v) (@call print "set" k v)))
        (@set o "a" 2)
        (@set o "b" 3)
        (@list (@get o "a") (@in o "b"))
        "#,
    );
    assert_eq!(result.unwrap().to_string(), "[2, false]");
    assert_eq!(output, "set b 3\n");
}

#[test]
fn test_has_and_delete_hooks() {
    let (result, output) = run_jack_with_output(
        r#"
        (@vars o)
        (@assign o (@object))
        (@set o @has (@fn (@params k) (@eq k "magic")))
        (@set o @delete (@fn (@params k) (@call print "deleting" k)))
        (@delete o "x")
        (@list (@in o "magic") (@in o "other"))
        "#,
    );
    assert_eq!(result.unwrap().to_string(), "[true, false]");
    assert_eq!(output, "deleting x\n");
}

#[test]
fn test_len_and_get_hooks_make_an_object_iterable_by_index() {
    let (_, output) = run_jack_with_output(
        r#"
        (@vars squares)
        (@assign squares (@object))
        (@set squares @len (@fn 3))
        (@set squares @get (@fn (@params i) (@mul i i)))
        (@for squares [i x] (@call print i x))
        "#,
    );
    assert_eq!(output, "0 0\n1 1\n2 4\n");
}

#[test]
fn test_keys_hook_replaces_enumeration() {
    let (_, output) = run_jack_with_output(
        r#"
        (@vars o)
        (@assign o (@object "a" 1 "b" 2 "c" 3))
        (@set o @keys (@fn (@list "c" "a")))
        (@for o [k v] (@call print k v))
        "#,
    );
    assert_eq!(output, "c 3\na 1\n");
}

#[test]
fn test_call_hook_turns_a_list_into_a_generator() {
    let (_, output) = run_jack_with_output(
        r#"
        (@vars l)
        (@assign l (@list 1 2 3))
        (@set l @call (@call range 2))
        (@for l [x] (@call print x))
        "#,
    );
    assert_eq!(output, "0\n1\n");
}

#[test]
fn test_meta_records_are_cached_per_value() {
    let mut ctx = EvalContext::new();
    let list = JackValue::new_list(vec![]);
    ctx.define_global("l", list.clone());
    ctx.evaluate("(@set l @tag 1)").unwrap();
    let first = ctx.metas.peek(&list).unwrap();
    ctx.evaluate("(@set l @tag 2) (@get l 0)").unwrap();
    let second = ctx.metas.peek(&list).unwrap();
    assert!(std::rc::Rc::ptr_eq(&first, &second));
    assert_eq!(second.slot("tag"), JackValue::integer(2));
}
