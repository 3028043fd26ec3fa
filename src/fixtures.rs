//! Built-in Eightebed test programs.
//!
//! These programs exercise the language end to end and double as CLI
//! inputs: passing `@name` instead of an input path selects the fixture
//! with that name.

/// Assign to an integer variable; prints nothing.
pub const SIMPLE_OK: &str = "\
    var int jim;
    {
        jim = 4;
    }
";

/// Arithmetic, comparison, and logical operators; prints `4 `.
pub const SIMPLE_ARITH: &str = "\
    {
        if (((3 * 3) = (10 - 1)) & (4 > 3)) {
            print ((4 + 8) / 3);
        }
    }
";

/// Declares `jim` twice; rejected by the type checker.
pub const DOUBLE_DECLARATION: &str = "\
    var int jim;
    var ptr to node jim;
    {
        print 3;
    }
";

/// A pointer to a pointer; rejected by the type checker.
pub const PTR_TO_PTR: &str = "\
    type node struct {
        int value;
        ptr to ptr to node next;
    };
    var node jim;
    {
        print [jim].value;
    }
";

/// A pointer to a primitive; rejected by the type checker.
pub const PTR_TO_INT: &str = "\
    var ptr to int kelly;
    {
        if valid kelly { print @kelly; }
    }
";

/// A struct nested inside a struct; rejected by the type checker.
pub const STRUCT_WITHIN_STRUCT: &str = "\
    type kooba struct {
        int value;
        struct {
            int whirlygig;
        } barnard;
    };
    var kooba jim;
    {
        print [jim].value;
    }
";

/// Names a non-struct type; rejected by the type checker.
pub const NAMED_INT: &str = "\
    type kooba int;
    var kooba jim;
    {
        print jim;
    }
";

/// Dereferences outside any `if valid`; rejected by the flow analyzer.
pub const DEREFERENCE_OUTSIDE_CONDITIONAL: &str = "\
    type node struct {
        int value;
        ptr to node next;
    };
    var ptr to node jim;
    {
        jim = malloc node;
        print [@jim].value;
        free jim;
    }
";

/// Dereferences after the pointer was reassigned inside the safe area;
/// rejected by the flow analyzer.
pub const DEREFERENCE_OUTSIDE_SAFE_AREA: &str = "\
    type node struct {
        int value;
        ptr to node next;
    };
    var ptr to node jim;
    var ptr to node murray;
    {
        jim = malloc node;
        if valid jim {
            jim = murray;
            print [@jim].value;
        }
        free jim;
    }
";

/// Dereferences after an alias was freed; rejected by the flow analyzer.
pub const DEREFERENCE_AFTER_FREE: &str = "\
    type node struct {
        int value;
        ptr to node next;
    };
    var ptr to node jim;
    var ptr to node donald;
    {
        jim = malloc node;
        donald = jim;
        if valid jim {
            free donald;
            print [@jim].value;
        }
    }
";

/// Dereferences an outer name inside a nested `if valid`; accepted.
pub const DEREFERENCE_WITHIN_NESTED_SAFE_AREA: &str = "\
    type node struct {
        int value;
        ptr to node next;
    };
    var ptr to node jim;
    {
        jim = malloc node;
        if valid jim {
            [@jim].next = malloc node;
        }
        if valid jim {
            if valid [@jim].next {
                print [@jim].value;
            }
        }
        free jim;
    }
";

/// Allocated nodes are zeroed, so a fresh link is invalid; prints `0 `.
pub const ALLOCATED_VALUES_INITIALIZED: &str = "\
    type node struct {
        int value;
        ptr to node next;
    };
    var ptr to node jim;
    var ptr to node nestor;
    {
        jim = malloc node;
        if valid jim {
            print [@jim].value;
            nestor = [@jim].next;
            if valid nestor {
                print 99;
            }
        }
        free jim;
    }
";

/// Counts down from five; prints `5 4 3 2 1 `.
pub const LOOP_1: &str = "\
    var int i;
    {
        i = 5;
        while i {
            print i;
            i = (i - 1);
        }
    }
";

/// Builds a 100-node list; prints nothing.
pub const ALLOCATING_LOOP: &str = "\
    type node struct {
        int value;
        ptr to node next;
    };
    var ptr to node jim;
    var ptr to node harry;
    var int i;
    {
        jim = malloc node;
        harry = jim;
        i = 100;
        while i {
            harry = malloc node;
            if valid jim {
                [@jim].value = i;
            }
            if valid jim {
                [@jim].next = harry;
                if valid harry {
                    jim = harry;
                }
            }
            i = (i - 1);
        }
    }
";

/// `free` invalidates the freed pointer itself; prints `53 `.
pub const FREE_INVALIDATES: &str = "\
    type node struct {
        int value;
        ptr to node next;
    };
    var ptr to node jim;
    {
        jim = malloc node;
        if valid jim {
            free jim;
        }
        if valid jim {
            print 42;
        }
        print 53;
    }
";

/// Freeing an interior alias stops a later walk exactly at the freed node;
/// prints `100 99 98 97 96 95 94 93 92 91 90 89 88 `.
pub const ALIAS_IS_INVALIDATED: &str = "\
    type node struct {
        int value;
        ptr to node next;
    };
    var ptr to node jim;
    var ptr to node harry;
    var ptr to node bertie;
    var ptr to node albert;
    var int i;
    {
        albert = malloc node;
        jim = albert;
        harry = jim;
        i = 100;
        while i {
            harry = malloc node;
            if valid jim {
                [@jim].value = i;
            }
            if (i = 87) {
                bertie = jim;
            }
            if valid jim {
                [@jim].next = harry;
                if valid harry {
                    jim = harry;
                }
            }
            i = (i - 1);
        }
        free bertie;
        jim = albert;
        while valid jim {
            if valid jim {
                print [@jim].value;
                jim = [@jim].next;
            }
        }
    }
";

/// Allocates and frees in a loop, keeping one survivor; prints `50 `.
pub const ALLOCATE_AND_FREE_LOOP: &str = "\
    type node struct {
        int value;
        ptr to node next;
    };
    var ptr to node fred;
    var ptr to node george;
    var int i;
    {
        i = 100;
        while i {
            fred = malloc node;
            if valid fred {
                [@fred].value = i;
            }
            if (i = 50) {
                george = fred;
            } else {
                free fred;
            }
            i = (i - 1);
        }
        if valid george {
            print [@george].value;
        }
    }
";

/// Looks up a fixture program by its name.
pub fn lookup(name: &str) -> Option<&'static str> {
    match name {
        "simple_ok" => Some(SIMPLE_OK),
        "simple_arith" => Some(SIMPLE_ARITH),
        "double_declaration" => Some(DOUBLE_DECLARATION),
        "ptr_to_ptr" => Some(PTR_TO_PTR),
        "ptr_to_int" => Some(PTR_TO_INT),
        "struct_within_struct" => Some(STRUCT_WITHIN_STRUCT),
        "named_int" => Some(NAMED_INT),
        "dereference_outside_conditional" => Some(DEREFERENCE_OUTSIDE_CONDITIONAL),
        "dereference_outside_safe_area" => Some(DEREFERENCE_OUTSIDE_SAFE_AREA),
        "dereference_after_free" => Some(DEREFERENCE_AFTER_FREE),
        "dereference_within_nested_safe_area" => Some(DEREFERENCE_WITHIN_NESTED_SAFE_AREA),
        "allocated_values_initialized" => Some(ALLOCATED_VALUES_INITIALIZED),
        "loop_1" => Some(LOOP_1),
        "allocating_loop" => Some(ALLOCATING_LOOP),
        "free_invalidates" => Some(FREE_INVALIDATES),
        "alias_is_invalidated" => Some(ALIAS_IS_INVALIDATED),
        "allocate_and_free_loop" => Some(ALLOCATE_AND_FREE_LOOP),
        _ => None,
    }
}
