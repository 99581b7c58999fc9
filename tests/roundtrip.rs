//! Round-trip identity: `serialize(parse(T)) == T` for every input, valid
//! or not. The corpus deliberately mixes modern WebIDL, legacy forms, and
//! malformed runs that exercise error recovery.

use rstest::rstest;
use widl_parser::{CollectingUi, Parser};

fn round_trip(source: &str) -> Parser {
    let parser = Parser::from_text(source);
    assert_eq!(parser.to_string(), source, "round trip failed");
    parser
}

#[rstest]
#[case::empty("")]
#[case::whitespace_only("   \n\t  ")]
#[case::comment_only("// just a comment\n")]
#[case::block_comment_only("/* nothing here */")]
#[case::simple_interface("interface Foo { attribute long bar; };")]
#[case::constructor_attribute("[Constructor(long x)] interface Foo { };")]
#[case::optional_arguments("interface Foo { void draw(long x, optional long y); };")]
#[case::dictionary("dictionary D : Base { required long x; DOMString y = \"hi\"; };")]
#[case::function_callback("callback C = void (long x);")]
#[case::recovered_member("interface Foo { garbage; attribute long bar; };")]
#[case::enum_trailing_comma("enum bar{\"one\",\"two\",\"three\",}; // and another\n")]
#[case::implements(" Window   implements     WindowInterface  ; // more comment\n")]
#[case::includes("Interface includes Mixin;\n\n[LegacyNoInterfaceObject] Interface includes Mixin;")]
#[case::unterminated_body("interface Foo { attribute long bar;")]
#[case::unterminated_comment("interface Foo { }; /* trailing")]
fn test_round_trip_cases(#[case] source: &str) {
    round_trip(source);
}

#[rstest]
#[case::empty("")]
#[case::whitespace_only(" \n ")]
#[case::comment_only("// nothing\n")]
fn test_trivia_only_inputs_have_no_constructs(#[case] source: &str) {
    let parser = round_trip(source);
    assert!(parser.is_empty());
}

/// A wide slice of the WebIDL surface, modern and legacy, in one source.
const KITCHEN_SINK: &str = r#"dictionary CSSFontFaceLoadEventInit : EventInit { sequence<CSSFontFaceRule> fontfaces = [ ]; };
interface Simple{
    serializer;
    serializer = { foo };
    serializer cereal(short one);
    iterable<Foo>;
    iterable<Foo, Bar>;
    async iterable<Foo>;
    async iterable<Foo, Bar>;
    async iterable<Foo, Bar>();
    async iterable<Foo, Bar>(DOMString name);
    readonly maplike<Foo, Bar>;
    setlike<Uint8ClampedArray>;
    attribute boolean required;
    attribute boolean foo-bar;
    attribute boolean -foo-bar;
    static attribute Foo foo;
    static Foo foo();
    Promise<ReallyISwear>? theCheckIsInTheMail();
}; // this is a comment éß
interface Multi : One  ,  Two   ,   Three     {
        attribute short one;
};
typedef (short or Foo) maybeFoo;
typedef sequence<(short or Foo)> maybeFoos;
typedef FrozenArray<(short or Foo)> frozenMaybeFoos;
typedef ObservableArray<(short or Foo)> observableMaybeFoos;
typedef record<USVString, any> recordAny;
interface foo {
  [one] attribute Foo one;
  [two] Foo two()bar;
  [three] const Foo three = 3}}foo
typedef   short    shorttype  = error this is;

   const  long    long   one=   2   ;
   const long hex = 0xabcdef09;
   const long octal = 0777;
   const double reallyHigh = Infinity;
   const double reallyLow = -Infinity;
   const double notANumber = NaN;
   const double invalid = - Infinity;
 Window   implements     WindowInterface  ; // more comment

enum   foo    {"one"  ,    "two",    }     ;
enum foo { "one" };
enum bar{"one","two","three",}; // and another
enum comments {
"one", //comment one
       // more comment
"two", //comment two
"three"  , //coment three
};

 typedef  short shorttype;
typedef long longtype;
typedef long long longtype;
[hello, my name is inigo montøya (you ] killed my father)] typedef unsigned long long inigo;
typedef unrestricted double dubloons;
typedef DOMString string;
typedef foo barType;
typedef object obj;
typedef (short or [Extended] double) union;
typedef (short or (long or double)) nestedUnion;
typedef (short or (long or double) or long long) moreNested;

[ Constructor , LegacyFactoryFunction = MyConstructor, Constructor (Foo one), LegacyFactoryFunction = MyOtherConstructor (Foo two , long long longest ) ] partial interface Foo: Bar {
    unsigned long long method(short x, unsigned long long y, optional double inf = Infinity, sequence<Foo>... fooArg) raises (hell);
    unsigned long long method(DOMString string, optional Foo foo = {});
    undefined abort();
    undefined anotherMethod(short round);
    [ha!] attribute short bar getraises (an, exception);
    const short fortyTwo = 42;
    attribute long async;
    long foo(long x, long y, long async);
    undefined bar(any constructor);
    long includes();
}
[ LegacyNoInterfaceObject , MapClass (short, Foo )] interface LinkStyle {
    constructor();
    constructor(int x);
    stringifier attribute DOMString mediaText;
    readonly attribute [Extended] short bar ;
    getter object (DOMString name);
    getter setter object bob (DOMString name);
    stringifier foo me(int x);
    stringifier foo ();
    stringifier;
    stringifier attribute short string;
    this is a syntax error, naturally
};
[foo] partial dictionary FooDict:BarDict {
    [one "]" ( tricky ] test)] short bar;
    [two] sequence<(double or [Extended] Foo)> foo = "hello";
    required Foo baz;
}

callback callFoo = short();
callback callFoo2 = unsigned long long(unrestricted double one, DOMString two, Fubar ... three);
callback interface callMe {
    inherit attribute short round setraises (for the heck of it);
};
callback interface mixin callMeMixin {
    long method();
};

[Exposed=(Window, Worker)] dictionary MyDictionary {
    any value = null;
};

[] interface _interface {
    readonly attribute long? service;
    readonly attribute ArrayBuffer? value;
    readonly attribute ArrayBuffer value2;
    attribute ArrayBuffer? value3;
};

namespace Namespace1 {
    [One] unsigned long long method([Extended] short x);
    [Two] unsigned long long method(short x, short y);
    readonly attribute long? value;
    const short fortyTwo = 42;
};
partial namespace Namespace2 {
    [One] unsigned long long method(short x);
    [Two] unsigned long long method(short x, short y);
};

interface System {
  object createObject(DOMString _interface);
  sequence<object> getObjects(DOMString interface);
  getter DOMString (DOMString keyName);
  DOMString? lookupPrefix(DOMString? namespace);
};

interface Interface {
  attribute long hello;
};

interface mixin Mixin {
  const double constantMember = 10.0;
  readonly attribute long readOnlyAttributeMember;
  attribute long attributeMember;
  DOMString? operationMember(long argument);
  stringifier;
};

Interface includes Mixin;

interface Underscores {
  attribute DOMString _or;
  boolean _includes(DOMString value);
};
interface BigNumbers {
  const bigint biiig = 42;
};
"#;

#[test]
fn test_kitchen_sink_round_trips() {
    round_trip(KITCHEN_SINK);
}

#[test]
fn test_kitchen_sink_reports_but_never_fails() {
    let ui = CollectingUi::new();
    let handle = ui.clone();
    let mut parser = Parser::with_ui(Box::new(ui));
    parser.parse(KITCHEN_SINK);
    assert_eq!(parser.to_string(), KITCHEN_SINK);
    // The corpus contains deliberate grammar errors and legacy forms.
    assert!(!handle.warnings().is_empty());
    assert!(!handle.notes().is_empty());
    assert!(handle.warnings().iter().all(|w| w.contains("IDL")));
}

#[test]
fn test_parse_appends() {
    let mut parser = Parser::new();
    parser.parse("interface A { };\n");
    parser.parse("interface B { };\n");
    assert_eq!(parser.len(), 2);
    assert_eq!(parser.to_string(), "interface A { };\ninterface B { };\n");
}

#[test]
fn test_reset_clears_constructs() {
    let mut parser = Parser::from_text("interface A { };");
    assert!(!parser.is_empty());
    parser.reset();
    assert!(parser.is_empty());
    assert_eq!(parser.to_string(), "");
}

#[test]
fn test_complexity_factor_is_additive() {
    let parser = Parser::from_text(KITCHEN_SINK);
    let total: usize = parser
        .constructs()
        .iter()
        .map(|c| widl_parser::Construct::complexity_factor(c))
        .sum();
    assert_eq!(parser.complexity_factor(), total);
    assert!(parser.complexity_factor() > 0);
}

#[test]
fn test_indexing_and_membership() {
    let parser = Parser::from_text("interface A { };\ninterface B { };");
    assert!(parser.contains("A"));
    assert!(parser.contains("B"));
    assert!(!parser.contains("C"));
    assert_eq!(widl_parser::Construct::name(&parser[1]).as_deref(), Some("B"));
}
