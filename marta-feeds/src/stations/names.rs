//! Seed list of canonical rail station names.

/// Known rail stations, in directory order.
///
/// Partial-name resolution walks this order and stops at the first match,
/// so `"PEACHTREE"` resolves to `PEACHTREE CENTER STATION` and `"WEST"` to
/// `WEST END STATION`.
pub const DEFAULT_STATIONS: [&str; 38] = [
    "AIRPORT STATION",
    "ARTS CENTER STATION",
    "ASHBY STATION",
    "AVONDALE STATION",
    "BANKHEAD STATION",
    "BROOKHAVEN STATION",
    "BUCKHEAD STATION",
    "CHAMBLEE STATION",
    "CIVIC CENTER STATION",
    "COLLEGE PARK STATION",
    "DECATUR STATION",
    "DORAVILLE STATION",
    "DUNWOODY STATION",
    "EAST LAKE STATION",
    "EAST POINT STATION",
    "EDGEWOOD CANDLER PARK STATION",
    "FIVE POINTS STATION",
    "GARNETT STATION",
    "GEORGIA STATE STATION",
    "HAMILTON E HOLMES STATION",
    "INDIAN CREEK STATION",
    "INMAN PARK STATION",
    "KENSINGTON STATION",
    "KING MEMORIAL STATION",
    "LAKEWOOD STATION",
    "LENOX STATION",
    "LINDBERGH STATION",
    "MEDICAL CENTER STATION",
    "MIDTOWN STATION",
    "NORTH AVE STATION",
    "NORTH SPRINGS STATION",
    "OAKLAND CITY STATION",
    "OMNI DOME STATION",
    "PEACHTREE CENTER STATION",
    "SANDY SPRINGS STATION",
    "VINE CITY STATION",
    "WEST END STATION",
    "WEST LAKE STATION",
];
