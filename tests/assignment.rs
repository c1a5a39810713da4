#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    tests! {
        simple in assignment is OK
        "2"
        "3"
    }

    tests! {
        chained in assignment is OK
        "3"
        "3"
    }

    tests! {
        compound in assignment is OK
        "15"
        "12"
    }

    tests! {
        compound_local in assignment is OK
        "6"
    }

    tests! {
        invalid_target in assignment is ERR
        "[Line 1] Error at '=': Invalid assignment target."
    }

    tests! {
        undefined_global in assignment is ERR
        "[Line 1] Error at 'missing': missing is undefined."
    }

    tests! {
        compound_on_property in assignment is ERR
        "[Line 3] Error at '-=': Invalid assignment target."
    }

    tests! {
        compound_on_string in assignment is ERR
        "[Line 2] Error at '+=': Operands must be a numbers."
    }
}
