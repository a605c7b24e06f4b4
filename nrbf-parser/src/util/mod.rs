/*!
 This module defines common utilities used when rendering decoded values.
*/

pub mod dates;
