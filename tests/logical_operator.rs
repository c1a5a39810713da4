#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        and_or in logical_operator is OK
        "2"
        "false"
        "true"
        "2"
        "fallback"
        "0"
    }

    tests! {
        short_circuit in logical_operator is OK
        "false"
        "true"
        "evaluated"
        "true"
    }

    tests! {
        symbolic in logical_operator is OK
        "2"
        "fallback"
        "false"
    }
}
