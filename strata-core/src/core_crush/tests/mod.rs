/*
    Tests for the node distribution layer

    Placement function properties live next to the implementation in
    placement.rs; these tests cover distributor state transitions, routing
    and aggregate listing.
*/

pub mod distributor_tests;
