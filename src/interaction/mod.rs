// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod controller;
pub mod headless;
pub mod hosts;
pub mod input;
pub mod motion;
pub mod playground;
pub mod session;
