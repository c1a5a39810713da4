#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        get_set in field is OK
        "apple"
        "3"
    }

    tests! {
        shadow_method in field is OK
        "method"
        "field"
    }

    tests! {
        undefined in field is ERR
        "[Line 3] Error at 'missing': Property 'missing' is undefined."
    }

    tests! {
        get_on_number in field is ERR
        "[Line 2] Error at 'value': Only instances have properties."
    }

    tests! {
        set_on_number in field is ERR
        "[Line 2] Error at 'value': Only instances have fields."
    }
}
