//! USB CDC pair for the debug build.

use core::fmt::Write;

use rp2040_hal::usb::UsbBus;
use usb_device::bus::UsbBusAllocator;
use usb_device::device::{StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbVidPid};
use usb_device::UsbError;
use usbd_serial::SerialPort;

pub struct UsbSerial<'a> {
    pub(crate) inner: SerialPort<'a, UsbBus>,
}

impl<'a> UsbSerial<'a> {
    pub fn new(usb_bus: &'a UsbBusAllocator<UsbBus>) -> Self {
        Self {
            inner: SerialPort::new(usb_bus),
        }
    }

    /// Push the whole buffer out, spinning through `WouldBlock` and giving
    /// up silently on any other transport error. Diagnostics are best
    /// effort.
    fn write_bytes(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            match self.inner.write(bytes) {
                Ok(wrote) => bytes = &bytes[wrote..],
                Err(UsbError::WouldBlock) => {}
                Err(_e) => return,
            }
        }
    }
}

impl Write for UsbSerial<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

pub struct UsbSerialDevice<'a> {
    pub(crate) inner: UsbDevice<'a, UsbBus>,
}

impl<'a> UsbSerialDevice<'a> {
    pub fn new(usb_bus: &'a UsbBusAllocator<UsbBus>) -> Self {
        let inner = UsbDeviceBuilder::new(usb_bus, UsbVidPid(0x16c0, 0x27dd))
            .strings(&[StringDescriptors::default()
                .manufacturer("Unbranded")
                .product("Macropad debug serial")
                .serial_number("1")])
            .unwrap()
            // CDC, from: https://www.usb.org/defined-class-codes
            .device_class(2)
            .build();
        Self { inner }
    }
}
