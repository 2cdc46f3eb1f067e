//! Statics for the USB stack.
//!
//! The bus allocator and the class/device pairs live in one-shot initialized
//! statics because the device structs borrow the allocator for `'static`.
//! In the `hiddev` build the interrupt handler polls them, so every access
//! from thread mode goes through a critical section. The `serial` build
//! polls from the main loop only, nothing else touches the statics.

use super::SyncUnsafeOnce;

pub struct SyncBus(core::cell::OnceCell<usb_device::bus::UsbBusAllocator<rp2040_hal::usb::UsbBus>>);

unsafe impl Sync for SyncBus {}

static USB_BUS: SyncBus = SyncBus(core::cell::OnceCell::new());

#[cfg(feature = "serial")]
static USB_DEVICE: SyncUnsafeOnce<crate::keyboard::usb_serial::UsbSerialDevice> =
    SyncUnsafeOnce::new();

#[cfg(feature = "serial")]
static USB_SERIAL: SyncUnsafeOnce<crate::keyboard::usb_serial::UsbSerial> = SyncUnsafeOnce::new();

#[cfg(feature = "serial")]
static USB_OUTPUT: SyncUnsafeOnce<bool> = SyncUnsafeOnce::new();

#[cfg(feature = "hiddev")]
static USB_HID: SyncUnsafeOnce<usbd_hid::hid_class::HIDClass<rp2040_hal::usb::UsbBus>> =
    SyncUnsafeOnce::new();

#[cfg(feature = "hiddev")]
static USB_HIDDEV: SyncUnsafeOnce<usb_device::device::UsbDevice<rp2040_hal::usb::UsbBus>> =
    SyncUnsafeOnce::new();

#[cfg(feature = "serial")]
pub unsafe fn init_usb(allocator: usb_device::bus::UsbBusAllocator<rp2040_hal::usb::UsbBus>) {
    let _ = USB_BUS.0.set(allocator);
    USB_OUTPUT.set(false);
    // Ordering here is extremely important, serial before device.
    USB_SERIAL.set(crate::keyboard::usb_serial::UsbSerial::new(
        USB_BUS.0.get().unwrap(),
    ));
    USB_DEVICE.set(crate::keyboard::usb_serial::UsbSerialDevice::new(
        USB_BUS.0.get().unwrap(),
    ));
}

#[cfg(feature = "hiddev")]
pub unsafe fn init_usb(allocator: usb_device::bus::UsbBusAllocator<rp2040_hal::usb::UsbBus>) {
    use usb_device::device::StringDescriptors;
    use usbd_hid::descriptor::SerializedDescriptor;
    let _ = USB_BUS.0.set(allocator);

    let usb_hid = usbd_hid::hid_class::HIDClass::new_ep_in(
        USB_BUS.0.get().unwrap(),
        usbd_hid::descriptor::KeyboardReport::desc(),
        1,
    );
    // Ordering here is extremely important, class before device.
    USB_HID.set(usb_hid);
    USB_HIDDEV.set(
        usb_device::device::UsbDeviceBuilder::new(
            USB_BUS.0.get().unwrap(),
            usb_device::device::UsbVidPid(0x16c0, 0x27db),
        )
        .strings(&[StringDescriptors::default()
            .manufacturer("Unbranded")
            .product("2x3 Macropad")
            .serial_number("1")])
        .unwrap()
        .device_class(0)
        .build(),
    );
}

/// True only when the endpoint actually accepted the report. A full endpoint
/// or a device that is not yet configured both leave the caller's baseline
/// untouched so the report gets retried.
#[cfg(feature = "hiddev")]
pub fn push_hid_report(keyboard_report: &usbd_hid::descriptor::KeyboardReport) -> bool {
    critical_section::with(|_| unsafe {
        matches!(
            USB_HID.as_mut().map(|hid| hid.push_input(keyboard_report)),
            Some(Ok(_))
        )
    })
}

#[inline]
#[cfg(feature = "hiddev")]
pub fn usb_hid_interrupt_poll() {
    unsafe {
        if let (Some(dev), Some(hid)) = (USB_HIDDEV.as_mut(), USB_HID.as_mut()) {
            dev.poll(&mut [hid]);
        }
    }
}

#[cfg(feature = "serial")]
pub fn acquire_usb<'a>() -> UsbGuard<'a> {
    // Single core and the serial build has no USB interrupt, thread mode
    // is the only accessor.
    UsbGuard {
        serial: unsafe { USB_SERIAL.as_mut() },
        dev: unsafe { USB_DEVICE.as_mut() },
        output: unsafe { USB_OUTPUT.as_mut() },
    }
}

#[cfg(feature = "serial")]
pub struct UsbGuard<'a> {
    pub serial: Option<&'a mut crate::keyboard::usb_serial::UsbSerial<'static>>,
    pub dev: Option<&'a mut crate::keyboard::usb_serial::UsbSerialDevice<'static>>,
    pub output: Option<&'a mut bool>,
}

#[cfg(feature = "serial")]
impl core::fmt::Write for UsbGuard<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if let Some(serial) = self.serial.as_mut() {
            if matches!(self.output.as_deref(), Some(true)) {
                return serial.write_str(s);
            }
        }
        Ok(())
    }
}
