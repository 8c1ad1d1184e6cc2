/*
    Tests for the pipeline composition engine

    Covers:
    - serialize → transform → store ordering and its inverse
    - chain order invariants and invertibility properties
    - absent-key and deletion semantics
*/
