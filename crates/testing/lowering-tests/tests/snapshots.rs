//! Snapshot dumps of lowered fixtures

use expect_test::expect;
use lowering_tests::{everything, load_fixture};
use og_ast::FileId;
use og_ast::dump::dump_source_file;
use og_ast_lower::lower_source_file;

#[test]
fn greeter_fixture() {
    let root = load_fixture("greeter").unwrap();
    let file = lower_source_file(&root, FileId(0)).unwrap();
    expect![[r#"
        package main @1
        import @2
          fmt as <inferred> @2
        method Greeter::greet(name string) @3
          expr (call fmt.Println "hi" name) @3
        func main() @4
          define g := (composite Greeter {}) @4
          expr (call (. g greet) "og") @5
          for define i := 0; (< i 3); incdec i++ @6
            assign total += i @6
    "#]]
    .assert_eq(&dump_source_file(&file));
}

#[test]
fn whole_unit() {
    let file = lower_source_file(&everything(), FileId(0)).unwrap();
    expect![[r#"
        package main @1
        import @2
          fmt as <inferred> @2
          strings as str @2
          math as <merge> @2
          os as <inferred> @3
        const @4
          limit int = 10 @4
        type @5
          Id = (int) @5
        type struct Box{items []T `json:"items"`; index map[string]*int; grid [4]byte; events <-chan int; hook func() (bool); sink interface{}; *Base; *clear()} @6
        type interface Reader{Read(p []byte) (int, error); io.Closer; Stringer} @16
        var @19
          counter int = 0 @19
          ready = @20
            if (> counter 0) @20
              expr true @20
            else @21
              expr false @21
        method *Box::push(xs ...T) (int) @23
          assign this.items = (call append this.items xs ...) @23
          return (call len this.items) @24
        func first<T>(xs []T) (T) @26
          return (index xs 0) @26
        func exit(code int) <extern> @28
        func main() @29
          define x := 1 @29
          assign x += 2 @30
          incdec x++ @31
          define ch := (call make chan int 1) @32
          send ch <- x @33
          empty @34
          expr (call fmt.Println this.count this (+ (- x) (paren (* x 2))) (slice list lo _) (slice list _ x 4) (assert value int) (conv float x) (method (*Box).push) (call make<int>)) @35
          define p, n, e, a, m, s, b := (composite Point {x: 1, 2: {3}, {}: 4, 5}), (composite []int {1}), (composite [...]int {1}), (composite [2]int {1, 2}), (composite map[string]int {}), (composite struct{} {}), (composite Box<int> {}) @36
          define cb := (func(n int) [1 stmts]) @37
          label outer @38
            for @38
              break outer @38
              continue @39
          goto outer @41
          if define y := x; (> y 0) @42
            expr (call positive) @42
          else if ready @43
            expr (call go_on) @43
          else @43
            incdec x-- @44
          switch define z := x; z @45
            case 1, 2 @45
              expr (call small) @45
              fallthrough @46
            case 3 @47
              expr (call three) @47
            case _ @47
              expr (call other) @47
          switch type v := value @49
            case int, string @49
              expr (call scalar) @49
            case _ @50
              expr (call other) @50
          select @52
            case send ch <- x @52
              expr (call sent) @52
            case recv msg := (<- ch) @53
              expr (call received) @53
            case recv x = (<- ch) @54
              expr (call stored) @54
            case _ @54
              expr (call idle) @54
          for define i := 0; (< i 10); incdec i++ @55
            expr (call tick) @55
          for k, v := range items @57
            expr (call visit) @57
          for x = range items @59
          for ready @60
            expr (call wait) @60
          go (call work) @61
          go func() @62
            expr (call work) @62
          defer (call (. fmt Println) "done") @64
          block @65
            expr (call scoped) @65
          var @67
            local int @67
          return @68
    "#]]
    .assert_eq(&dump_source_file(&file));
}
