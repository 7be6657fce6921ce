//! Built-in classification presets
//!
//! The Bureau of Economic Analysis eight-region taxonomy over US state
//! postal codes, and the territory exclusions that accompany it.

use regionate_core::{ExclusionSet, GroupMapping};

/// BEA region assignment for the 50 states and the District of Columbia.
pub fn bea_regions() -> GroupMapping {
    [
        ("CT", "New England"),
        ("ME", "New England"),
        ("MA", "New England"),
        ("NH", "New England"),
        ("RI", "New England"),
        ("VT", "New England"),
        ("DE", "Mideast"),
        ("DC", "Mideast"),
        ("MD", "Mideast"),
        ("NJ", "Mideast"),
        ("NY", "Mideast"),
        ("PA", "Mideast"),
        ("IL", "Great Lakes"),
        ("IN", "Great Lakes"),
        ("MI", "Great Lakes"),
        ("OH", "Great Lakes"),
        ("WI", "Great Lakes"),
        ("IA", "Plains"),
        ("KS", "Plains"),
        ("MN", "Plains"),
        ("MO", "Plains"),
        ("NE", "Plains"),
        ("ND", "Plains"),
        ("SD", "Plains"),
        ("AL", "Southeast"),
        ("AR", "Southeast"),
        ("FL", "Southeast"),
        ("GA", "Southeast"),
        ("KY", "Southeast"),
        ("LA", "Southeast"),
        ("MS", "Southeast"),
        ("NC", "Southeast"),
        ("SC", "Southeast"),
        ("TN", "Southeast"),
        ("VA", "Southeast"),
        ("WV", "Southeast"),
        ("AZ", "Southwest"),
        ("NM", "Southwest"),
        ("OK", "Southwest"),
        ("TX", "Southwest"),
        ("CO", "Rocky Mountain"),
        ("ID", "Rocky Mountain"),
        ("MT", "Rocky Mountain"),
        ("UT", "Rocky Mountain"),
        ("WY", "Rocky Mountain"),
        ("AK", "Far West"),
        ("CA", "Far West"),
        ("HI", "Far West"),
        ("NV", "Far West"),
        ("OR", "Far West"),
        ("WA", "Far West"),
    ]
    .into_iter()
    .collect()
}

/// US territories outside the BEA region taxonomy.
pub fn us_territories() -> ExclusionSet {
    ["PR", "GU", "VI", "MP", "AS"].into_iter().collect()
}
