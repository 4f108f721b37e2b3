// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Contract holding a single greeting, set once at deployment and replaceable
//! afterwards.

#![no_std]

extern crate alloc;

use alloc::string::String;
use core::mem;

use piecrust_uplink as uplink;

/// Topic of the event emitted whenever the greeting is replaced. The event
/// data is the `(previous, new)` pair.
pub const GREETING_CHANGED: &str = "greeting_changed";

/// Longest greeting accepted, in bytes. Both halves of the change event must
/// fit in the argument buffer together.
pub const MAX_GREETING_LEN: usize = uplink::ARGBUF_LEN / 2 - 64;

/// Struct that describes the state of the Transactions contract
pub struct Transactions {
    greeting: String,
}

/// State of the Transactions contract
static mut STATE: Transactions = Transactions {
    greeting: String::new(),
};

impl Transactions {
    /// Store the greeting given at deployment
    pub fn init(&mut self, greeting: String) {
        assert!(greeting.len() <= MAX_GREETING_LEN, "greeting too long");
        self.greeting = greeting;
    }

    /// Read the current greeting
    pub fn greet(&self) -> String {
        self.greeting.clone()
    }

    /// Replace the greeting, announcing the change
    pub fn set_greeting(&mut self, greeting: String) {
        assert!(greeting.len() <= MAX_GREETING_LEN, "greeting too long");
        let previous = mem::replace(&mut self.greeting, greeting);
        uplink::emit(GREETING_CHANGED, (previous, self.greeting.clone()));
    }
}

/// Expose `Transactions::init()` to the host
#[no_mangle]
unsafe fn init(arg_len: u32) -> u32 {
    uplink::wrap_call(arg_len, |greeting: String| STATE.init(greeting))
}

/// Expose `Transactions::greet()` to the host
#[no_mangle]
unsafe fn greet(arg_len: u32) -> u32 {
    uplink::wrap_call(arg_len, |_: ()| STATE.greet())
}

/// Expose `Transactions::set_greeting()` to the host
#[no_mangle]
unsafe fn set_greeting(arg_len: u32) -> u32 {
    uplink::wrap_call(arg_len, |greeting: String| STATE.set_greeting(greeting))
}
